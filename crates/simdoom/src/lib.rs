//! # SIMDOOM
//!
//! A text ray-caster that runs as a smart-card style application: the
//! host drives it exclusively through APDU-style command records.
//!
//! ```text
//! host ──[80 02 00 00 01 'w']──▶ CommandDispatcher ──▶ [90 00]
//!                                   │
//!                                   ├─ Arena::begin_transaction()
//!                                   ├─ Command::decode()
//!                                   └─ EntitySimulator / ScreenCompositor
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use simdoom::CommandDispatcher;
//!
//! let mut card = CommandDispatcher::new();
//! assert_eq!(card.process(&[0x80, 0x01, 0x00, 0x00]), &[0x90, 0x00]);
//! let screen = card.process(&[0x80, 0x04, 0x00, 0x00]).to_vec();
//! assert_eq!(screen.len(), 40 * 25 + 2);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod dispatcher;
pub mod replay;

pub use dispatcher::{CommandDispatcher, DispatchError, DispatchResult, Phase};
pub use replay::{ReplayError, SessionLog, SessionRecorder};
