//! # Game Configuration
//!
//! Every tuning value of the simulation. Sizes (map, screen, pools) are
//! compile-time constants in `simdoom_shared`; everything here can change
//! without a rebuild.
//!
//! ```toml
//! starting_health = 100
//! move_step = 128      # half a tile
//! turn_increment = 90
//! ```
//!
//! Missing keys fall back to [`GameConfig::default`]; unknown keys are
//! rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tuning values for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Health on INIT.
    pub starting_health: u8,
    /// Ammo on INIT.
    pub starting_ammo: u8,
    /// Health cap (at most 100).
    pub max_health: u8,
    /// Ammo cap (at most 99).
    pub max_ammo: u8,
    /// Level built on INIT.
    pub starting_level: u8,
    /// Distance of one move, in 1/256 tiles.
    pub move_step: i32,
    /// Degrees per turn.
    pub turn_increment: i32,
    /// Bullet displacement per tick, in 1/256 tiles.
    pub bullet_speed: i32,
    /// Hit points of a freshly spawned enemy.
    pub enemy_health: u8,
    /// Ticks between enemy steps.
    pub enemy_move_interval: u8,
    /// Health lost per enemy contact.
    pub enemy_damage: u8,
    /// Ammo gained from an ammo tile.
    pub ammo_pickup: u8,
    /// Health gained from a health tile.
    pub health_pickup: u8,
    /// Bytes in the per-command arena.
    pub arena_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: 100,
            starting_ammo: 20,
            max_health: 100,
            max_ammo: 99,
            starting_level: 1,
            move_step: 128,
            turn_increment: 90,
            bullet_speed: 256,
            enemy_health: 2,
            enemy_move_interval: 4,
            enemy_damage: 10,
            ammo_pickup: 10,
            health_pickup: 25,
            arena_capacity: 4096,
        }
    }
}

impl GameConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`GameConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid =
            |field: &'static str, reason: &'static str| Err(ConfigError::Invalid { field, reason });

        if self.max_health == 0 || self.max_health > 100 {
            return invalid("max_health", "must be in 1..=100");
        }
        if self.max_ammo > 99 {
            return invalid("max_ammo", "must be at most 99");
        }
        if self.starting_health == 0 || self.starting_health > self.max_health {
            return invalid("starting_health", "must be in 1..=max_health");
        }
        if self.starting_ammo > self.max_ammo {
            return invalid("starting_ammo", "must not exceed max_ammo");
        }
        if !(1..=256).contains(&self.move_step) {
            return invalid("move_step", "must be in 1..=256");
        }
        if !(1..=359).contains(&self.turn_increment) {
            return invalid("turn_increment", "must be in 1..=359");
        }
        if !(1..=256).contains(&self.bullet_speed) {
            return invalid("bullet_speed", "must be in 1..=256");
        }
        if self.enemy_health == 0 {
            return invalid("enemy_health", "must be at least 1");
        }
        if self.enemy_move_interval == 0 {
            return invalid("enemy_move_interval", "must be at least 1");
        }
        Ok(())
    }
}
