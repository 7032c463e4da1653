//! # Memory Management
//!
//! Everything the game touches is allocated once. During a command:
//! - Transient working memory comes from the [`Arena`]
//! - Bullets and enemies live in fixed [`SlotPool`]s
//! - Nothing is freed individually; the arena is wiped wholesale

mod arena;
mod pool;

pub use arena::{Arena, ArenaSlice};
pub use pool::{Slot, SlotId, SlotPool};
