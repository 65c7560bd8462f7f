//! Wire Protocol Replies
//!
//! This module owns the reply side of the line-based wire protocol: the
//! typed [`Reply`] value handlers return and its single encoder.
//!
//! The request side (reading a command name plus arguments off a socket)
//! belongs to the transport layer, which hands the dispatcher an already
//! decoded command.
//!
//! ## Example
//!
//! ```
//! use emberkv::protocol::Reply;
//!
//! let reply = Reply::bulk("role:master");
//! assert_eq!(reply.encode(), "$11\r\nrole:master\r\n");
//! ```

pub mod reply;

// Re-export commonly used types for convenience
pub use reply::Reply;
