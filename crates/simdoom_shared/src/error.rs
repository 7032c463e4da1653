//! # Protocol Error Types

use thiserror::Error;

use crate::protocol::StatusWord;

/// A command record that failed validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Fewer bytes than a header.
    #[error("command too short: {len} bytes")]
    TooShort {
        /// Bytes received.
        len: usize,
    },

    /// The length byte promises more data than was sent.
    #[error("length byte declares {declared} data bytes, {available} present")]
    LengthMismatch {
        /// Value of the length byte.
        declared: usize,
        /// Data bytes actually present.
        available: usize,
    },

    /// INPUT without a key byte.
    #[error("input command carries no key")]
    MissingInput,

    /// Class byte is not the game class.
    #[error("wrong class byte: {0:#04x}")]
    WrongClass(u8),

    /// Instruction byte is not recognized.
    #[error("unknown instruction: {0:#04x}")]
    UnknownInstruction(u8),
}

impl ProtocolError {
    /// The status word reported to the host.
    #[must_use]
    pub const fn status_word(&self) -> StatusWord {
        match self {
            Self::TooShort { .. } | Self::LengthMismatch { .. } | Self::MissingInput => {
                StatusWord::WRONG_LENGTH
            }
            Self::WrongClass(_) => StatusWord::WRONG_CLASS,
            Self::UnknownInstruction(_) => StatusWord::WRONG_INSTRUCTION,
        }
    }
}

/// Result type for protocol decoding.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
