//! Wire-level errors.
//!
//! A [`ProtocolError`] either ends the stream (I/O, an oversized line) or
//! spoils a single line ([`ProtocolError::InvalidMessage`]). The codec skips
//! the second kind; see [`ProtocolError::is_recoverable`].

use thiserror::Error;

/// Result alias for wire operations.
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Failure reading, writing, or decoding IRC traffic.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// Socket or TLS failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line grew past the framing ceiling without a terminator.
    #[error("line of {actual} bytes exceeds the {limit} byte limit")]
    MessageTooLong {
        /// Bytes buffered so far.
        actual: usize,
        /// Configured ceiling.
        limit: usize,
    },

    /// Outgoing text carried a control character IRC cannot transport.
    #[error("illegal control character {0:?} in outgoing line")]
    IllegalControlChar(char),

    /// One line could not be turned into a [`crate::Message`].
    #[error("cannot parse {string:?}: {cause}")]
    InvalidMessage {
        /// The offending line.
        string: String,
        /// Why it was rejected.
        #[source]
        cause: MessageParseError,
    },
}

impl ProtocolError {
    /// Whether the stream is still usable after this error.
    ///
    /// Only a malformed line qualifies: the framing is intact and the next
    /// line starts cleanly.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidMessage { .. })
    }
}

/// Why a single line is not a valid message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Nothing but line terminators.
    #[error("empty line")]
    EmptyMessage,

    /// No command name where one was required.
    #[error("missing command")]
    InvalidCommand,

    /// Source prefix with spaces or control characters.
    #[error("bad source prefix {0:?}")]
    InvalidPrefix(String),

    /// The line stopped matching IRC grammar at `position`.
    #[error("unexpected input at byte {position} ({context})")]
    ParseContext {
        /// Byte offset of the failure.
        position: usize,
        /// What the parser was looking for.
        context: String,
    },
}
