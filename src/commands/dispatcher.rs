//! Command Dispatcher
//!
//! This module routes a decoded command (name plus string arguments) to
//! its handler and produces a typed [`Reply`]. The transport layer decodes
//! one command per call and writes the encoded reply back; the dispatcher
//! itself carries no state across calls.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   CommandDispatcher                         │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │ normalize() │───>│  dispatch() │───>│  cmd_*()    │      │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘      │
//! │                                               │             │
//! │                                    ┌──────────┴──────────┐  │
//! │                                    ▼                     ▼  │
//! │                                 Store            ReplicaConfig
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! - `PING` - liveness check
//! - `ECHO message` - echo the argument back
//! - `GET key` - read a key
//! - `SET key value [PX milliseconds]` - write a key
//! - `INFO section` - server information (`replication` only)
//! - `REPLCONF ...` - replication handshake stub
//! - `PSYNC ...` - full resynchronization stub

use std::sync::Arc;

use tracing::{trace, warn};

use crate::commands::CommandError;
use crate::protocol::Reply;
use crate::replication::ReplicaConfig;
use crate::storage::Store;

/// Routes commands to their handlers.
///
/// Holds its two collaborators behind `Arc` so one store and one
/// replication config can back every per-connection dispatcher. The
/// dispatcher performs no locking of its own; the store synchronizes
/// itself and the config is read-only from here.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    /// The key-value store
    store: Arc<Store>,
    /// Replication metadata, mutated only by the replication subsystem
    config: Arc<ReplicaConfig>,
}

impl CommandDispatcher {
    /// Creates a dispatcher over the given store and replication config.
    pub fn new(store: Arc<Store>, config: Arc<ReplicaConfig>) -> Self {
        Self { store, config }
    }

    /// Executes one command and returns the typed reply.
    ///
    /// The command name is matched case-insensitively. An unknown name
    /// yields `-ERR unknown command`; there is no partial matching.
    pub fn dispatch(&self, name: &str, args: &[String]) -> Reply {
        let command = name.to_uppercase();
        trace!(command = %command, argc = args.len(), "dispatching");

        let result = match command.as_str() {
            "PING" => self.cmd_ping(args),
            "ECHO" => self.cmd_echo(args),
            "GET" => self.cmd_get(args),
            "SET" => self.cmd_set(args),
            "INFO" => self.cmd_info(args),
            "REPLCONF" => self.cmd_replconf(args),
            "PSYNC" => self.cmd_psync(args),
            _ => {
                warn!(command = %command, "unknown command");
                Err(CommandError::UnknownCommand)
            }
        };

        result.unwrap_or_else(Reply::from)
    }

    /// Executes one command and returns the encoded wire reply.
    ///
    /// A null reply encodes as the empty string; the transport writes
    /// `$-1\r\n` in its place.
    pub fn dispatch_wire(&self, name: &str, args: &[String]) -> String {
        self.dispatch(name, args).encode()
    }

    /// PING
    ///
    /// Always `+PONG`; arguments are ignored.
    fn cmd_ping(&self, _args: &[String]) -> Result<Reply, CommandError> {
        Ok(Reply::pong())
    }

    /// ECHO message
    ///
    /// Replies with the first argument as a simple string. Arguments past
    /// the first are ignored.
    fn cmd_echo(&self, args: &[String]) -> Result<Reply, CommandError> {
        let message = args.first().ok_or(CommandError::NoArgument)?;
        Ok(Reply::simple(message))
    }

    /// GET key
    ///
    /// A miss, including a read of an expired entry, replies null.
    fn cmd_get(&self, args: &[String]) -> Result<Reply, CommandError> {
        let key = args.first().ok_or(CommandError::NoArgument)?;

        match self.store.get(key) {
            Some(value) => Ok(Reply::simple(value)),
            None => Ok(Reply::null()),
        }
    }

    /// SET key value [PX milliseconds]
    ///
    /// Replaces any prior value and expiry for the key. The only accepted
    /// option shape is exactly `PX <millis>`; anything else is a syntax
    /// error.
    fn cmd_set(&self, args: &[String]) -> Result<Reply, CommandError> {
        if args.len() < 2 {
            return Err(CommandError::NotEnoughArguments);
        }

        let mut expiry_millis: i64 = 0;
        if args.len() > 2 {
            if args.len() == 4 && args[2].eq_ignore_ascii_case("PX") {
                expiry_millis = args[3]
                    .parse()
                    .map_err(|_| CommandError::InvalidExpiration)?;
            } else {
                return Err(CommandError::SetSyntax);
            }
        }

        self.store.set(&args[0], &args[1], expiry_millis);
        Ok(Reply::ok())
    }

    /// INFO section
    ///
    /// Only the `replication` section is supported. The reply is a bulk
    /// string whose declared length is the byte length of the joined body.
    fn cmd_info(&self, args: &[String]) -> Result<Reply, CommandError> {
        let section = args.first().ok_or(CommandError::NoArgument)?;

        match section.to_lowercase().as_str() {
            "replication" => Ok(Reply::bulk(self.replication_info())),
            _ => Err(CommandError::UnsupportedInfoSection),
        }
    }

    /// Formats the nine-line replication section body, CRLF-joined with
    /// no trailing terminator.
    fn replication_info(&self) -> String {
        let config = &self.config;
        let lines = [
            format!("role:{}", config.role),
            format!("connected_slaves:{}", config.connected_slaves),
            format!("master_replid:{}", config.master_replid),
            format!("master_repl_offset:{}", config.master_repl_offset),
            format!("second_repl_offset:{}", config.second_repl_offset),
            format!("repl_backlog_active:{}", config.repl_backlog_active),
            format!("repl_backlog_size:{}", config.repl_backlog_size),
            format!(
                "repl_backlog_first_byte_offset:{}",
                config.repl_backlog_first_byte_offset
            ),
            format!("repl_backlog_histlen:{}", config.repl_backlog_histlen),
        ];
        lines.join("\r\n")
    }

    /// REPLCONF ...
    ///
    /// Handshake acknowledgment stub; no state is recorded.
    fn cmd_replconf(&self, _args: &[String]) -> Result<Reply, CommandError> {
        Ok(Reply::ok())
    }

    /// PSYNC ...
    ///
    /// Signals the start of a full resynchronization; no data transfer
    /// follows from this layer, and the offset is always zero.
    fn cmd_psync(&self, _args: &[String]) -> Result<Reply, CommandError> {
        Ok(Reply::simple(format!(
            "FULLRESYNC {} 0",
            self.config.master_replid
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    const REPLID: &str = "8371b4fb1155b71f4a04d3e1bc3e18c4a990aeeb";

    fn fixed_config() -> ReplicaConfig {
        ReplicaConfig {
            role: "master".to_string(),
            connected_slaves: 0,
            master_replid: REPLID.to_string(),
            master_repl_offset: 0,
            second_repl_offset: -1,
            repl_backlog_active: 0,
            repl_backlog_size: 1_048_576,
            repl_backlog_first_byte_offset: 0,
            repl_backlog_histlen: 0,
        }
    }

    fn create_dispatcher() -> CommandDispatcher {
        // Make dispatch traces visible under RUST_LOG when a test fails
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        CommandDispatcher::new(Arc::new(Store::new()), Arc::new(fixed_config()))
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ping() {
        let dispatcher = create_dispatcher();
        assert_eq!(dispatcher.dispatch_wire("PING", &[]), "+PONG");
    }

    #[test]
    fn test_echo() {
        let dispatcher = create_dispatcher();
        assert_eq!(dispatcher.dispatch_wire("ECHO", &args(&["hello"])), "+hello");
    }

    #[test]
    fn test_echo_without_argument() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("ECHO", &[]),
            "-ERR no argument provided"
        );
    }

    #[test]
    fn test_set_then_get() {
        let dispatcher = create_dispatcher();
        assert_eq!(dispatcher.dispatch_wire("SET", &args(&["k", "v"])), "+OK");
        assert_eq!(dispatcher.dispatch_wire("GET", &args(&["k"])), "+v");
    }

    #[test]
    fn test_get_without_argument() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("GET", &[]),
            "-ERR no argument provided"
        );
    }

    #[test]
    fn test_get_missing_key_is_null() {
        let dispatcher = create_dispatcher();
        assert_eq!(dispatcher.dispatch_wire("GET", &args(&["nope"])), "");
        assert!(dispatcher.dispatch("GET", &args(&["nope"])).is_null());
    }

    #[test]
    fn test_set_with_px_expiry() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("SET", &args(&["k", "v", "PX", "100"])),
            "+OK"
        );
        // Immediately readable
        assert_eq!(dispatcher.dispatch_wire("GET", &args(&["k"])), "+v");
    }

    #[test]
    fn test_px_token_is_case_insensitive() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("SET", &args(&["k", "v", "px", "100"])),
            "+OK"
        );
    }

    #[test]
    fn test_expired_key_reads_as_null() {
        let dispatcher = create_dispatcher();
        dispatcher.dispatch_wire("SET", &args(&["k", "v", "PX", "1"]));
        thread::sleep(Duration::from_millis(10));
        assert_eq!(dispatcher.dispatch_wire("GET", &args(&["k"])), "");
    }

    #[test]
    fn test_set_replaces_value() {
        let dispatcher = create_dispatcher();
        dispatcher.dispatch_wire("SET", &args(&["k", "old"]));
        dispatcher.dispatch_wire("SET", &args(&["k", "new"]));
        assert_eq!(dispatcher.dispatch_wire("GET", &args(&["k"])), "+new");
    }

    #[test]
    fn test_set_invalid_expiration() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("SET", &args(&["k", "v", "px", "abc"])),
            "-ERR invalid expiration time"
        );
    }

    #[test]
    fn test_set_unknown_option_is_syntax_error() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("SET", &args(&["k", "v", "XX", "100"])),
            "-ERR wrong number of arguments for 'set' command or wrong syntax"
        );
    }

    #[test]
    fn test_set_three_args_is_syntax_error() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("SET", &args(&["k", "v", "PX"])),
            "-ERR wrong number of arguments for 'set' command or wrong syntax"
        );
    }

    #[test]
    fn test_set_five_args_is_syntax_error() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("SET", &args(&["k", "v", "PX", "100", "extra"])),
            "-ERR wrong number of arguments for 'set' command or wrong syntax"
        );
    }

    #[test]
    fn test_set_too_few_args() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("SET", &args(&["k"])),
            "-ERR not enough arguments"
        );
    }

    #[test]
    fn test_command_names_are_case_insensitive() {
        let dispatcher = create_dispatcher();
        for name in ["SET", "set", "SeT"] {
            assert_eq!(dispatcher.dispatch_wire(name, &args(&["k", "v"])), "+OK");
        }
        for name in ["GET", "get", "GeT"] {
            assert_eq!(dispatcher.dispatch_wire(name, &args(&["k"])), "+v");
        }
        assert_eq!(dispatcher.dispatch_wire("ping", &[]), "+PONG");
    }

    #[test]
    fn test_info_replication() {
        let dispatcher = create_dispatcher();
        let wire = dispatcher.dispatch_wire("INFO", &args(&["replication"]));

        // $<len>\r\n<body>\r\n with <len> exactly the body's byte length
        let rest = wire.strip_prefix('$').expect("bulk reply");
        let (declared, framed) = rest.split_once("\r\n").expect("length line");
        let body = framed.strip_suffix("\r\n").expect("trailing CRLF");
        assert_eq!(declared.parse::<usize>().unwrap(), body.len());

        let lines: Vec<&str> = body.split("\r\n").collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "role:master");
        assert_eq!(lines[1], "connected_slaves:0");
        assert_eq!(lines[2], format!("master_replid:{}", REPLID));
        assert_eq!(lines[3], "master_repl_offset:0");
        assert_eq!(lines[4], "second_repl_offset:-1");
        assert_eq!(lines[5], "repl_backlog_active:0");
        assert_eq!(lines[6], "repl_backlog_size:1048576");
        assert_eq!(lines[7], "repl_backlog_first_byte_offset:0");
        assert_eq!(lines[8], "repl_backlog_histlen:0");
    }

    #[test]
    fn test_info_section_is_case_insensitive() {
        let dispatcher = create_dispatcher();
        let wire = dispatcher.dispatch_wire("INFO", &args(&["REPLICATION"]));
        assert!(wire.starts_with('$'));
    }

    #[test]
    fn test_info_unsupported_section() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("INFO", &args(&["memory"])),
            "-ERR unsupported INFO section"
        );
    }

    #[test]
    fn test_info_without_argument() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("INFO", &[]),
            "-ERR no argument provided"
        );
    }

    #[test]
    fn test_replconf_always_ok() {
        let dispatcher = create_dispatcher();
        assert_eq!(dispatcher.dispatch_wire("REPLCONF", &[]), "+OK");
        assert_eq!(
            dispatcher.dispatch_wire("REPLCONF", &args(&["listening-port", "6380"])),
            "+OK"
        );
    }

    #[test]
    fn test_psync_echoes_replid_with_zero_offset() {
        let dispatcher = create_dispatcher();
        let wire = dispatcher.dispatch_wire("PSYNC", &args(&["?", "-1"]));
        assert_eq!(wire, format!("+FULLRESYNC {} 0", REPLID));
        assert!(wire.ends_with(" 0"));
    }

    #[test]
    fn test_unknown_command() {
        let dispatcher = create_dispatcher();
        assert_eq!(
            dispatcher.dispatch_wire("FOO", &[]),
            "-ERR unknown command"
        );
    }

    #[test]
    fn test_dispatchers_share_one_store() {
        let store = Arc::new(Store::new());
        let config = Arc::new(fixed_config());
        let a = CommandDispatcher::new(Arc::clone(&store), Arc::clone(&config));
        let b = CommandDispatcher::new(store, config);

        a.dispatch_wire("SET", &args(&["shared", "yes"]));
        assert_eq!(b.dispatch_wire("GET", &args(&["shared"])), "+yes");
    }
}
