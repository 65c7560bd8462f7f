//! Command Processing Layer
//!
//! This module receives decoded commands, validates their arguments,
//! executes them against the store and replication config, and returns
//! typed replies.
//!
//! ## Architecture
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌───────────────────┐
//! │ Transport decode  │  (out of scope)
//! └─────────┬─────────┘
//!           │ name + args
//!           ▼
//! ┌───────────────────┐
//! │ CommandDispatcher │  (this module)
//! │                   │
//! │  - Normalize      │
//! │  - Validate       │
//! │  - Execute        │
//! └─────────┬─────────┘
//!           │
//!     ┌─────┴──────┐
//!     ▼            ▼
//!   Store    ReplicaConfig
//! ```
//!
//! ## Supported Commands
//!
//! - `PING`, `ECHO`
//! - `GET`, `SET` (with optional `PX` expiry)
//! - `INFO` (`replication` section)
//! - `REPLCONF`, `PSYNC` (handshake stubs)

pub mod dispatcher;
pub mod error;

// Re-export the main entry points
pub use dispatcher::CommandDispatcher;
pub use error::CommandError;
