//! # EmberKV - Command Dispatch Core for a Redis-Wire Key-Value Server
//!
//! EmberKV is the command-dispatch and reply-encoding seed of a
//! Redis-wire-compatible key-value server. It routes decoded commands to
//! their handlers, reads and writes a thread-safe expiring store, and
//! produces protocol-correct reply strings for a transport layer to send.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                           EmberKV                              │
//! │                                                                │
//! │   transport (out of scope)                                     │
//! │        │ name + args                    encoded reply ▲        │
//! │        ▼                                              │        │
//! │  ┌───────────────────┐                        ┌───────┴─────┐  │
//! │  │ CommandDispatcher │───────────────────────>│    Reply    │  │
//! │  └─────────┬─────────┘                        └─────────────┘  │
//! │            │                                                   │
//! │      ┌─────┴────────────┐                                      │
//! │      ▼                  ▼                                      │
//! │  ┌────────┐      ┌───────────────┐                             │
//! │  │ Store  │      │ ReplicaConfig │                             │
//! │  └────────┘      └───────────────┘                             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transport layer (connection handling, request decoding) is out of
//! scope: one decoded command goes in, one encoded reply string comes out,
//! and nothing here suspends, retries, or performs I/O.
//!
//! ## Quick Start
//!
//! ```
//! use emberkv::commands::CommandDispatcher;
//! use emberkv::replication::ReplicaConfig;
//! use emberkv::storage::Store;
//! use std::sync::Arc;
//!
//! let store = Arc::new(Store::new());
//! let config = Arc::new(ReplicaConfig::new_master());
//! let dispatcher = CommandDispatcher::new(store, config);
//!
//! assert_eq!(dispatcher.dispatch_wire("PING", &[]), "+PONG");
//!
//! let set_args = vec!["greeting".to_string(), "hello".to_string()];
//! assert_eq!(dispatcher.dispatch_wire("SET", &set_args), "+OK");
//!
//! let get_args = vec!["greeting".to_string()];
//! assert_eq!(dispatcher.dispatch_wire("GET", &get_args), "+hello");
//! ```
//!
//! ## Module Overview
//!
//! - [`commands`]: the dispatcher and per-command handlers
//! - [`protocol`]: typed replies and their single wire encoder
//! - [`storage`]: thread-safe key-value store with lazy per-key expiry
//! - [`replication`]: read-only replication metadata
//!
//! ## Design Highlights
//!
//! ### Stateless Dispatch
//!
//! The dispatcher carries no state across calls. All cross-call state
//! lives in the [`storage::Store`] (which synchronizes itself) and the
//! [`replication::ReplicaConfig`] (read-only from this layer), so one
//! dispatcher can be cloned per client connection without coordination.
//!
//! ### One Encoding Site
//!
//! Handlers return a typed [`protocol::Reply`]; the wire format is
//! produced by a single encoder. A null reply encodes as the empty
//! string, which the transport translates to the null bulk `$-1\r\n`.
//!
//! ### Lazy Expiry
//!
//! A key written with a `PX` deadline behaves as not-found once the
//! deadline passes; the store reclaims the entry when it is next read.
//! There is no background sweeper at this layer.

pub mod commands;
pub mod protocol;
pub mod replication;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::{CommandDispatcher, CommandError};
pub use protocol::Reply;
pub use replication::ReplicaConfig;
pub use storage::Store;

/// The default port the mimicked wire protocol uses
pub const DEFAULT_PORT: u16 = 6379;

/// Version of EmberKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
