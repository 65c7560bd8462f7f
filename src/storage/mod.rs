//! Storage Module
//!
//! A thread-safe, sharded key-value store with per-key expiry. This is
//! the collaborator the command dispatcher reads and writes; it owns its
//! own locking so dispatchers can share it behind an `Arc` without any
//! coordination of their own.
//!
//! Expiry here is lazy only: an expired entry is reclaimed when it is
//! next read. Background sweeping and eviction are deliberately absent
//! from this layer.
//!
//! ## Example
//!
//! ```
//! use emberkv::storage::Store;
//!
//! let store = Store::new();
//!
//! // No expiry
//! store.set("name", "ember", 0);
//! assert_eq!(store.get("name"), Some("ember".to_string()));
//!
//! // Expire 60 seconds from now
//! store.set("session", "token123", 60_000);
//! ```

pub mod store;

// Re-export commonly used types
pub use store::{Entry, Store, StoreStats};
