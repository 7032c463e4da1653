//! # Protocol & Geometry Constants
//!
//! **CRITICAL:** These sizes are compiled into both sides of the wire.
//! The screen buffer and every pool are sized from them at build time.

// =============================================================================
// COMMAND RECORD
// =============================================================================

/// The only accepted class byte.
pub const GAME_CLASS: u8 = 0x80;

/// Bytes in a command header (class, instruction, p1, p2).
pub const HEADER_LEN: usize = 4;

/// Offset of the optional length byte.
pub const LC_OFFSET: usize = HEADER_LEN;

/// Offset of the first data byte.
pub const DATA_OFFSET: usize = HEADER_LEN + 1;

// =============================================================================
// SCREEN
// =============================================================================

/// Screen width in characters.
pub const SCREEN_WIDTH: usize = 40;

/// Screen height in characters.
pub const SCREEN_HEIGHT: usize = 25;

/// Screen buffer size in bytes (row-major, one byte per cell).
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Rows available to the 3D view; the rest belong to the HUD.
pub const VIEW_ROWS: usize = 23;

/// Row holding the health/ammo/level line.
pub const STATUS_ROW: usize = 23;

/// Row holding help text or the end-of-game message.
pub const MESSAGE_ROW: usize = 24;

// =============================================================================
// WORLD
// =============================================================================

/// Map width in tiles.
pub const MAP_WIDTH: usize = 32;

/// Map height in tiles.
pub const MAP_HEIGHT: usize = 32;

/// Bullet pool capacity.
pub const MAX_BULLETS: usize = 4;

/// Enemy pool capacity.
pub const MAX_ENEMIES: usize = 8;

// =============================================================================
// RESPONSES
// =============================================================================

/// Size of a status word on the wire.
pub const STATUS_WORD_LEN: usize = 2;

/// Size of the GET_STATUS payload.
pub const STATUS_RECORD_LEN: usize = 5;

/// Largest possible response (GET_SCREEN).
pub const MAX_RESPONSE_SIZE: usize = SCREEN_SIZE + STATUS_WORD_LEN;
