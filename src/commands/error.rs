//! Command Error Taxonomy
//!
//! Every failure a handler can produce is a value of [`CommandError`].
//! The `Display` strings are the exact protocol messages, so conversion
//! into an error reply is a single `From` impl rather than string
//! literals scattered through the handlers.
//!
//! All of these surface as protocol error replies on one dispatch; none
//! aborts the connection or the process.

use thiserror::Error;

use crate::protocol::Reply;

/// A command failure, mapped 1:1 to a wire error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A command that requires an argument was given none (ECHO, GET, INFO).
    #[error("ERR no argument provided")]
    NoArgument,

    /// SET was given fewer than key and value.
    #[error("ERR not enough arguments")]
    NotEnoughArguments,

    /// SET's expiry count failed to parse as a base-10 integer.
    #[error("ERR invalid expiration time")]
    InvalidExpiration,

    /// SET was given an argument shape that is neither `key value` nor
    /// `key value PX millis`.
    #[error("ERR wrong number of arguments for 'set' command or wrong syntax")]
    SetSyntax,

    /// INFO was asked for a section other than `replication`.
    #[error("ERR unsupported INFO section")]
    UnsupportedInfoSection,

    /// The command name matched nothing in the dispatch table.
    #[error("ERR unknown command")]
    UnknownCommand,
}

impl From<CommandError> for Reply {
    fn from(err: CommandError) -> Self {
        Reply::error(err.to_string())
    }
}
