//! # SIMDOOM Sim
//!
//! The deterministic heart of the game:
//!
//! - [`WorldMap`]: the tile grid, Wall on the border and outside it
//! - [`raycast`]: fixed-step ray marching, one ray per screen column
//! - [`EntitySimulator`]: player actions and the per-tick world update
//! - [`ScreenCompositor`]: 3D slivers, top-down overlay and HUD
//!
//! All state lives in one [`GameState`]; nothing here keeps a reference
//! to it between calls.
//!
//! ## Example
//!
//! ```rust,ignore
//! use simdoom_core::Arena;
//! use simdoom_sim::{EntitySimulator, FrameScratch, GameConfig, ScreenCompositor};
//!
//! let config = GameConfig::default();
//! let simulator = EntitySimulator::new(&config);
//! let mut state = simulator.new_game();
//! let mut arena = Arena::new(config.arena_capacity);
//!
//! arena.begin_transaction();
//! let scratch = FrameScratch::reserve(&mut arena)?;   // before any mutation
//! simulator.tick(&mut state);
//! ScreenCompositor::new().render(&mut state, &scratch, &mut arena)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod compositor;
pub mod config;
pub mod entities;
pub mod error;
pub mod raycast;
pub mod simulator;
pub mod state;
pub mod world;

pub use compositor::{FrameScratch, ScreenBuffer, ScreenCompositor};
pub use config::GameConfig;
pub use entities::{step_toward, Bullet, Enemy};
pub use error::{ConfigError, SimError, SimResult};
pub use raycast::{cast_ray, RayHit};
pub use simulator::{ActionOutcome, EntitySimulator, TickReport};
pub use state::{GameState, Pose};
pub use world::{Tile, WorldMap};
