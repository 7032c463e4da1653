//! # SIMDOOM Core
//!
//! Memory and math primitives for a game that has to live inside a
//! secure element with a few kilobytes of RAM:
//! - A bump arena that is reset at every command boundary
//! - Fixed-capacity slot pools (no growth, first-free-slot reuse)
//! - 8.8 fixed-point positions and a table-driven sine/cosine
//!
//! ## Architecture Rules
//!
//! 1. **No growth after construction** - every buffer is sized up front
//! 2. **No floating point** - identical inputs give identical outputs on every target
//! 3. **Fail closed** - running out of room returns `None`, never panics
//!
//! ## Example
//!
//! ```rust,ignore
//! use simdoom_core::{Arena, Fixed, trig};
//!
//! let mut arena = Arena::new(4096);
//! let columns = arena.alloc::<u16>(40).expect("fits");
//! arena.slice_mut(&columns).unwrap().fill(0);
//!
//! let step = Fixed::HALF.scale_q8(trig::cos(0)); // half a tile east
//! arena.reset(); // `columns` is now stale
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod math;
pub mod memory;

pub use math::{trig, Fixed, FixedVec};
pub use memory::{Arena, ArenaSlice, Slot, SlotId, SlotPool};
