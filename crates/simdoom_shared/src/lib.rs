//! # SIMDOOM Shared
//!
//! The byte-level contract between a host and the game core.
//!
//! A host sends APDU-style command records:
//!
//! ```text
//! [class:1][instruction:1][p1:1][p2:1]([lc:1][data:lc])
//! ```
//!
//! and receives a payload followed by a big-endian status word.
//! [`Command::decode`] validates a record once at the boundary and turns it
//! into a tagged [`Command`]; [`ResponseWriter`] builds replies in a fixed
//! buffer.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod constants;
pub mod error;
pub mod input;
pub mod protocol;
pub mod response;

pub use constants::{SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
pub use error::{ProtocolError, ProtocolResult};
pub use input::PlayerAction;
pub use protocol::{Command, CommandHeader, Instruction, StatusRecord, StatusWord};
pub use response::ResponseWriter;
