//! Reply Types for the Line-Based Wire Protocol
//!
//! This module defines the typed reply value every command handler returns,
//! together with the single place where replies are encoded for the wire.
//!
//! ## Protocol Format
//!
//! Each reply starts with a type prefix character:
//! - `+` Simple String
//! - `-` Error
//! - `:` Integer
//! - `$` Bulk String
//!
//! ## Examples
//!
//! Simple String: `+OK`
//! Error: `-ERR unknown command`
//! Integer: `:1000`
//! Bulk String: `$5\r\nhello\r\n`
//! Null: encoded as the empty string, which the transport translates
//! to the null bulk string `$-1\r\n`
//!
//! ## Framing
//!
//! Line replies (`+`, `-`, `:`) carry no trailing CRLF; the transport
//! appends it when writing the reply to the socket. Bulk strings carry
//! their complete framing, trailing CRLF included, because their declared
//! length must cover exactly the payload and nothing else.

use std::fmt;

/// The CRLF terminator used inside bulk-string framing.
pub const CRLF: &str = "\r\n";

/// Reply type prefixes.
pub mod prefix {
    pub const SIMPLE_STRING: char = '+';
    pub const ERROR: char = '-';
    pub const INTEGER: char = ':';
    pub const BULK_STRING: char = '$';
}

/// A typed reply produced by a command handler.
///
/// Having one variant type with one encoder means an encoding decision
/// (say, switching a command from simple-string to bulk-string replies)
/// is a single-site change instead of scattered string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Short, CR/LF-free text. Encoded as `+<text>`.
    Simple(String),

    /// An error condition. The message carries its own `ERR ` prefix.
    /// Encoded as `-<message>`.
    Error(String),

    /// 64-bit signed integer. Encoded as `:<n>`.
    Integer(i64),

    /// Length-prefixed, binary-safe text. Encoded as
    /// `$<byte-length>\r\n<text>\r\n`.
    Bulk(String),

    /// Absence of a value. Encoded as the empty string; the transport
    /// writes `$-1\r\n` in its place.
    Null,
}

impl Reply {
    /// Creates a simple string reply.
    pub fn simple(s: impl Into<String>) -> Self {
        Reply::Simple(s.into())
    }

    /// Creates an error reply.
    ///
    /// # Example
    /// ```
    /// use emberkv::protocol::Reply;
    /// let err = Reply::error("ERR unknown command");
    /// assert_eq!(err.encode(), "-ERR unknown command");
    /// ```
    pub fn error(s: impl Into<String>) -> Self {
        Reply::Error(s.into())
    }

    /// Creates an integer reply.
    pub fn integer(n: i64) -> Self {
        Reply::Integer(n)
    }

    /// Creates a bulk string reply.
    pub fn bulk(s: impl Into<String>) -> Self {
        Reply::Bulk(s.into())
    }

    /// Creates a null reply.
    pub fn null() -> Self {
        Reply::Null
    }

    /// Common reply for successful operations.
    pub fn ok() -> Self {
        Reply::Simple("OK".to_string())
    }

    /// Common reply for PING.
    pub fn pong() -> Self {
        Reply::Simple("PONG".to_string())
    }

    /// Encodes the reply for the wire.
    ///
    /// This is the only serialization site in the crate. The bulk-string
    /// length is the byte length of the payload, not its character count.
    pub fn encode(&self) -> String {
        match self {
            Reply::Simple(s) => format!("{}{}", prefix::SIMPLE_STRING, s),
            Reply::Error(s) => format!("{}{}", prefix::ERROR, s),
            Reply::Integer(n) => format!("{}{}", prefix::INTEGER, n),
            Reply::Bulk(s) => format!(
                "{}{}{}{}{}",
                prefix::BULK_STRING,
                s.len(),
                CRLF,
                s,
                CRLF
            ),
            Reply::Null => String::new(),
        }
    }

    /// Returns true if this reply is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Reply::Null)
    }

    /// Returns true if this reply is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Simple(s) => write!(f, "\"{}\"", s),
            Reply::Error(s) => write!(f, "(error) {}", s),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::Bulk(s) => write!(f, "\"{}\"", s),
            Reply::Null => write!(f, "(nil)"),
        }
    }
}
