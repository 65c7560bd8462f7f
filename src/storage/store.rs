//! Thread-Safe Key-Value Store with Per-Key Expiry
//!
//! This module implements the store the command dispatcher reads and
//! writes. It is a sharded, thread-safe `HashMap` whose entries may carry
//! an absolute expiry deadline.
//!
//! ## Design Decisions
//!
//! 1. **Sharded Locks**: multiple shards instead of one big lock, so
//!    concurrent dispatches on different keys rarely contend.
//! 2. **Lazy Expiry**: expired entries are detected and removed on access.
//!    There is no background sweeper; an expired key that is never read
//!    again stays resident until touched.
//! 3. **RwLock**: multiple concurrent readers, exclusive writers.
//!
//! ## Concurrency Model
//!
//! The store provides all of its own synchronization. Callers share it
//! behind an `Arc` and never lock around it; one logical operation maps
//! to one store call.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

use tracing::debug;

/// Number of shards. More shards = less lock contention, more memory
/// overhead. 16 is plenty for a per-connection dispatch workload.
const NUM_SHARDS: usize = 16;

/// A stored value with an optional expiry deadline.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored value
    pub value: String,
    /// When this entry expires (None = never expires)
    pub expires_at: Option<Instant>,
}

impl Entry {
    /// Creates an entry without expiry.
    pub fn new(value: String) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Creates an entry that expires `ttl` from now.
    pub fn with_ttl(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Some(Instant::now() + ttl),
        }
    }

    /// Checks if this entry has expired.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|exp| Instant::now() >= exp)
            .unwrap_or(false)
    }
}

/// A single shard holding a portion of the keyspace.
#[derive(Debug, Default)]
struct Shard {
    entries: RwLock<HashMap<String, Entry>>,
}

/// Counters snapshot returned by [`Store::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Live (non-expired at last count) keys
    pub keys: u64,
    /// Total GET operations served
    pub get_ops: u64,
    /// Total SET operations served
    pub set_ops: u64,
    /// Entries removed because they were read after their deadline
    pub expired: u64,
}

/// The key-value store consumed by the command dispatcher.
///
/// # Contract
///
/// - `get` returns `None` for a missing key and for an expired one; a
///   read of an expired entry behaves exactly as not-found.
/// - `set` replaces any prior value and expiry for the key. An
///   `expiry_millis` of zero or less means "no expiry"; a positive value
///   means "expire that many milliseconds from the call".
///
/// # Thread Safety
///
/// Designed to be wrapped in an `Arc` and shared across every client
/// handler task. All operations are thread-safe.
///
/// # Example
///
/// ```
/// use emberkv::storage::Store;
///
/// let store = Store::new();
/// store.set("name", "ember", 0);
/// assert_eq!(store.get("name"), Some("ember".to_string()));
/// assert_eq!(store.get("missing"), None);
/// ```
pub struct Store {
    /// Sharded storage for reduced lock contention
    shards: Vec<Shard>,

    /// Statistics: live keys (approximate under concurrency)
    key_count: AtomicU64,

    /// Statistics: total GET operations
    get_count: AtomicU64,

    /// Statistics: total SET operations
    set_count: AtomicU64,

    /// Statistics: entries reclaimed by lazy expiry
    expired_count: AtomicU64,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("shards", &self.shards.len())
            .field("key_count", &self.key_count.load(Ordering::Relaxed))
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .field("set_count", &self.set_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        let shards = (0..NUM_SHARDS).map(|_| Shard::default()).collect();

        Self {
            shards,
            key_count: AtomicU64::new(0),
            get_count: AtomicU64::new(0),
            set_count: AtomicU64::new(0),
            expired_count: AtomicU64::new(0),
        }
    }

    /// Determines which shard a key belongs to.
    #[inline]
    fn shard_for(&self, key: &str) -> &Shard {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % NUM_SHARDS]
    }

    /// Sets a key, replacing any prior value and expiry.
    ///
    /// `expiry_millis <= 0` stores the key without expiry; a positive
    /// value stores a deadline that many milliseconds from now.
    pub fn set(&self, key: &str, value: &str, expiry_millis: i64) {
        self.set_count.fetch_add(1, Ordering::Relaxed);

        let entry = if expiry_millis > 0 {
            Entry::with_ttl(
                value.to_string(),
                Duration::from_millis(expiry_millis as u64),
            )
        } else {
            Entry::new(value.to_string())
        };

        let shard = self.shard_for(key);
        let mut entries = shard.entries.write().unwrap();

        if entries.insert(key.to_string(), entry).is_none() {
            self.key_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Gets the value for a key.
    ///
    /// Returns `None` if the key doesn't exist or has expired. This
    /// implements lazy expiry: an expired entry is removed on access.
    pub fn get(&self, key: &str) -> Option<String> {
        self.get_count.fetch_add(1, Ordering::Relaxed);

        let shard = self.shard_for(key);

        // Fast path under the read lock for live keys
        {
            let entries = shard.entries.read().unwrap();
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Key exists but is past its deadline: take the write lock and
        // remove it. Another thread may have replaced it in between, so
        // re-check before removing.
        let mut entries = shard.entries.write().unwrap();
        if let Some(entry) = entries.get(key) {
            if entry.is_expired() {
                entries.remove(key);
                self.key_count.fetch_sub(1, Ordering::Relaxed);
                self.expired_count.fetch_add(1, Ordering::Relaxed);
                debug!(key, "removed expired entry on access");
                return None;
            }
            return Some(entry.value.clone());
        }

        None
    }

    /// Number of resident keys, expired-but-unreclaimed entries included.
    pub fn len(&self) -> usize {
        self.key_count.load(Ordering::Relaxed) as usize
    }

    /// Returns true if no keys are resident.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of the operation counters.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            keys: self.key_count.load(Ordering::Relaxed),
            get_ops: self.get_count.load(Ordering::Relaxed),
            set_ops: self.set_count.load(Ordering::Relaxed),
            expired: self.expired_count.load(Ordering::Relaxed),
        }
    }
}
