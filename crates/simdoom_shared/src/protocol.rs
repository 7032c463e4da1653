//! Command records and status words.
//!
//! A record is decoded exactly once, at the boundary, into a [`Command`].
//! Everything past [`Command::decode`] works with the tagged variant.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::constants::{DATA_OFFSET, GAME_CLASS, HEADER_LEN, LC_OFFSET};
use crate::error::{ProtocolError, ProtocolResult};

/// Instruction byte values.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Create (or recreate) the game.
    Init = 0x01,
    /// Apply one key press.
    Input = 0x02,
    /// Advance one tick and re-render.
    Update = 0x03,
    /// Fetch the screen buffer.
    GetScreen = 0x04,
    /// Fetch the status record.
    GetStatus = 0x05,
    /// Drop the game.
    Reset = 0x06,
}

impl Instruction {
    /// Converts from the wire byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Init),
            0x02 => Some(Self::Input),
            0x03 => Some(Self::Update),
            0x04 => Some(Self::GetScreen),
            0x05 => Some(Self::GetStatus),
            0x06 => Some(Self::Reset),
            _ => None,
        }
    }
}

/// The fixed four-byte header of every command record.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct CommandHeader {
    /// Class byte (must be [`GAME_CLASS`]).
    pub class: u8,
    /// Instruction byte.
    pub instruction: u8,
    /// First parameter (unused by the game).
    pub p1: u8,
    /// Second parameter (unused by the game).
    pub p2: u8,
}

impl CommandHeader {
    /// Reads the header from the front of a record.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::TooShort`] if fewer than four bytes are present.
    pub fn parse(bytes: &[u8]) -> ProtocolResult<Self> {
        let head = bytes
            .get(..HEADER_LEN)
            .ok_or(ProtocolError::TooShort { len: bytes.len() })?;
        Ok(bytemuck::pod_read_unaligned(head))
    }
}

/// A validated command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create (or recreate) the game.
    Init,
    /// Apply one key press.
    Input {
        /// The raw key byte (see [`PlayerAction::from_key`](crate::PlayerAction::from_key)).
        key: u8,
    },
    /// Advance one tick and re-render.
    Update,
    /// Fetch the screen buffer.
    GetScreen,
    /// Fetch the status record.
    GetStatus,
    /// Drop the game.
    Reset,
}

impl Command {
    /// Decodes and validates a command record.
    ///
    /// Checks run in a fixed order: length, then class, then instruction.
    /// Bytes beyond the declared data length are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProtocolError`] encountered.
    pub fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        let header = CommandHeader::parse(bytes)?;
        let data = data_field(bytes)?;

        if header.class != GAME_CLASS {
            return Err(ProtocolError::WrongClass(header.class));
        }

        let instruction = Instruction::from_u8(header.instruction)
            .ok_or(ProtocolError::UnknownInstruction(header.instruction))?;

        Ok(match instruction {
            Instruction::Init => Self::Init,
            Instruction::Input => {
                let key = *data.first().ok_or(ProtocolError::MissingInput)?;
                Self::Input { key }
            }
            Instruction::Update => Self::Update,
            Instruction::GetScreen => Self::GetScreen,
            Instruction::GetStatus => Self::GetStatus,
            Instruction::Reset => Self::Reset,
        })
    }

    /// The instruction this command was decoded from.
    #[must_use]
    pub const fn instruction(&self) -> Instruction {
        match self {
            Self::Init => Instruction::Init,
            Self::Input { .. } => Instruction::Input,
            Self::Update => Instruction::Update,
            Self::GetScreen => Instruction::GetScreen,
            Self::GetStatus => Instruction::GetStatus,
            Self::Reset => Instruction::Reset,
        }
    }

    /// Encodes the command as a host would send it.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![GAME_CLASS, self.instruction() as u8, 0, 0];
        if let Self::Input { key } = self {
            bytes.extend_from_slice(&[1, *key]);
        }
        bytes
    }
}

/// The data field of a record, honoring the optional length byte.
fn data_field(bytes: &[u8]) -> ProtocolResult<&[u8]> {
    let Some(&lc) = bytes.get(LC_OFFSET) else {
        return Ok(&[]);
    };
    let declared = usize::from(lc);
    let rest = &bytes[DATA_OFFSET..];
    rest.get(..declared).ok_or(ProtocolError::LengthMismatch {
        declared,
        available: rest.len(),
    })
}

/// Two-byte status word, sent big-endian after every payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusWord(u16);

impl StatusWord {
    /// Command completed.
    pub const SUCCESS: Self = Self(0x9000);
    /// Record too short or data length inconsistent.
    pub const WRONG_LENGTH: Self = Self(0x6700);
    /// Unexpected class byte.
    pub const WRONG_CLASS: Self = Self(0x6E00);
    /// Unknown instruction byte.
    pub const WRONG_INSTRUCTION: Self = Self(0x6D00);
    /// Command needs a game and none exists.
    pub const NOT_INITIALIZED: Self = Self(0x6986);
    /// Internal failure (for example, out of working memory).
    pub const GENERIC_ERROR: Self = Self(0x6F00);

    /// Wraps a raw value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Wire representation.
    #[inline]
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Reads the trailing status word of a response.
    #[must_use]
    pub fn from_response(response: &[u8]) -> Option<Self> {
        let tail = response.len().checked_sub(2)?;
        let bytes: [u8; 2] = response[tail..].try_into().ok()?;
        Some(Self(u16::from_be_bytes(bytes)))
    }

    /// Returns true for [`StatusWord::SUCCESS`].
    #[inline]
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }
}

impl fmt::Debug for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatusWord({:#06X})", self.0)
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

/// GET_STATUS payload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Player health (0-100).
    pub health: u8,
    /// Ammo (0-99).
    pub ammo: u8,
    /// Current level.
    pub level: u8,
    /// 1 once the game has ended.
    pub game_over: u8,
    /// 1 if the game ended at the exit.
    pub victory: u8,
}

impl StatusRecord {
    /// Reads a record from the front of a response payload.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let head = bytes.get(..std::mem::size_of::<Self>())?;
        Some(bytemuck::pod_read_unaligned(head))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_record_size() {
        assert_eq!(
            std::mem::size_of::<StatusRecord>(),
            crate::constants::STATUS_RECORD_LEN
        );
        assert_eq!(std::mem::size_of::<CommandHeader>(), HEADER_LEN);
    }

    #[test]
    fn test_decode_bare_header() {
        assert_eq!(Command::decode(&[0x80, 0x01, 0, 0]), Ok(Command::Init));
        assert_eq!(Command::decode(&[0x80, 0x06, 0, 0, 0]), Ok(Command::Reset));
    }

    #[test]
    fn test_decode_input_reads_data_byte() {
        assert_eq!(
            Command::decode(&[0x80, 0x02, 0, 0, 1, b'w']),
            Ok(Command::Input { key: b'w' })
        );
    }

    #[test]
    fn test_decode_validation_order() {
        assert_eq!(
            Command::decode(&[0x80, 0x01]),
            Err(ProtocolError::TooShort { len: 2 })
        );
        // Length is checked before class.
        assert_eq!(
            Command::decode(&[0x00, 0x02, 0, 0, 3, 1]),
            Err(ProtocolError::LengthMismatch { declared: 3, available: 1 })
        );
        assert_eq!(
            Command::decode(&[0x00, 0x09, 0, 0]),
            Err(ProtocolError::WrongClass(0x00))
        );
        assert_eq!(
            Command::decode(&[0x80, 0x09, 0, 0]),
            Err(ProtocolError::UnknownInstruction(0x09))
        );
        assert_eq!(
            Command::decode(&[0x80, 0x02, 0, 0, 0]),
            Err(ProtocolError::MissingInput)
        );
    }

    #[test]
    fn test_status_word_wire_order() {
        assert_eq!(StatusWord::SUCCESS.to_bytes(), [0x90, 0x00]);
        assert_eq!(StatusWord::NOT_INITIALIZED.to_bytes(), [0x69, 0x86]);
        assert_eq!(
            StatusWord::from_response(&[1, 2, 0x6F, 0x00]),
            Some(StatusWord::GENERIC_ERROR)
        );
        assert_eq!(StatusWord::from_response(&[0x90]), None);
    }

    #[test]
    fn test_host_encoding_decodes() {
        for command in [Command::Init, Command::Update, Command::Input { key: b' ' }] {
            assert_eq!(Command::decode(&command.to_bytes()), Ok(command));
        }
    }
}
