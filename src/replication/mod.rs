//! Replication Module
//!
//! Holds [`ReplicaConfig`], the replication metadata the dispatcher reads
//! when serving `INFO replication` and the `PSYNC` handshake stub. The
//! actual replication stream, backlog, and replica bookkeeping are out of
//! scope for this crate; only their counters surface here.

pub mod config;

pub use config::ReplicaConfig;
