//! Replication Metadata
//!
//! Read-only (from the dispatcher's point of view) description of this
//! node's replication role and counters. The replication subsystem that
//! mutates these fields lives outside this crate; here they are only
//! formatted into INFO sections and handshake replies.

use rand::Rng;

/// Length of a replication ID on the wire.
const REPLID_LEN: usize = 40;

/// Process-wide replication state.
///
/// Owned explicitly and handed to the dispatcher at construction, never
/// reached through a hidden singleton, so tests can inject fixed
/// configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicaConfig {
    /// `master` or `slave`
    pub role: String,
    /// Number of connected replicas
    pub connected_slaves: i64,
    /// 40-character hex replication ID
    pub master_replid: String,
    /// Offset of the replication stream this node has produced
    pub master_repl_offset: i64,
    /// Offset up to which the previous replication ID is valid
    pub second_repl_offset: i64,
    /// Whether the replication backlog is allocated (0 or 1)
    pub repl_backlog_active: i64,
    /// Capacity of the replication backlog in bytes
    pub repl_backlog_size: i64,
    /// Stream offset of the first byte held in the backlog
    pub repl_backlog_first_byte_offset: i64,
    /// Number of bytes currently held in the backlog
    pub repl_backlog_histlen: i64,
}

impl ReplicaConfig {
    /// Creates the configuration of a fresh master node with a newly
    /// generated replication ID and all counters at zero.
    pub fn new_master() -> Self {
        Self {
            role: "master".to_string(),
            master_replid: generate_replid(),
            second_repl_offset: -1,
            ..Self::default()
        }
    }
}

/// Generates a pseudo-random 40-character lowercase hex replication ID.
fn generate_replid() -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();
    (0..REPLID_LEN)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect()
}
