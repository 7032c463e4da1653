//! # Deterministic Math
//!
//! Integer-only arithmetic for positions and angles. No `f32`/`f64`
//! anywhere in the simulation path.

mod fixed;
pub mod trig;

pub use fixed::{Fixed, FixedVec};
