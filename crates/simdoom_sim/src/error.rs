//! # Simulation Error Types
//!
//! All errors that can occur while configuring or running a game.

use thiserror::Error;

/// Errors raised while running a command against a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The per-command arena could not hold the frame scratch.
    #[error("arena exhausted: requested {requested} bytes, {remaining} remaining")]
    ArenaExhausted {
        /// Bytes requested.
        requested: usize,
        /// Bytes left in the arena.
        remaining: usize,
    },

    /// A scratch handle outlived the transaction that produced it.
    #[error("frame scratch is stale (arena was reset)")]
    StaleScratch,
}

/// Errors raised while loading or validating a [`GameConfig`](crate::GameConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
