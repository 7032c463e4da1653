//! # Screen Compositor
//!
//! Turns a [`GameState`] into a 40×25 character frame:
//!
//! ```text
//! rows 0..23   3D view: one ray per column, shaded by distance,
//!              with the top-down overlay (pickups, bullets, enemies,
//!              heading, player) drawn on top
//! row 23       HP:100 AM:20 L:1
//! row 24       help text, or the centred end-of-game message
//! ```
//!
//! Per-column ray results are written into a [`FrameScratch`] carved out
//! of the command's arena before the frame is composed.

use std::io::Write;

use simdoom_core::{Arena, ArenaSlice};
use simdoom_shared::constants::{
    MESSAGE_ROW, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH, STATUS_ROW, VIEW_ROWS,
};

use crate::error::{SimError, SimResult};
use crate::raycast::{cast_ray, column_offset, wall_glyph, wall_height};
use crate::state::GameState;
use crate::world::Tile;

/// Help text shown while the game is running.
pub const HELP_TEXT: &str = "WASD=move QE=turn SPC=fire";

/// Message shown after reaching the exit.
pub const VICTORY_TEXT: &str = "VICTORY! You found the exit!";

/// Message shown after dying.
pub const DEFEAT_TEXT: &str = "GAME OVER - You died!";

/// Screen column of the player glyph.
pub const PLAYER_COLUMN: usize = SCREEN_WIDTH / 2;

/// Screen row of the player glyph.
pub const PLAYER_ROW: usize = (SCREEN_HEIGHT - 3) / 2;

/// Row-major character grid.
#[derive(Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    cells: [u8; SCREEN_SIZE],
}

impl ScreenBuffer {
    /// A blank screen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [b' '; SCREEN_SIZE],
        }
    }

    /// Fills the screen with spaces.
    pub fn clear(&mut self) {
        self.cells.fill(b' ');
    }

    /// The raw bytes, row-major.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// One row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= SCREEN_HEIGHT`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * SCREEN_WIDTH..(row + 1) * SCREEN_WIDTH]
    }

    /// One row, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `row >= SCREEN_HEIGHT`.
    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        &mut self.cells[row * SCREEN_WIDTH..(row + 1) * SCREEN_WIDTH]
    }

    /// The glyph at `(column, row)`, if on screen.
    #[must_use]
    pub fn get(&self, column: usize, row: usize) -> Option<u8> {
        (column < SCREEN_WIDTH && row < SCREEN_HEIGHT)
            .then(|| self.cells[row * SCREEN_WIDTH + column])
    }

    /// Writes a glyph; off-screen writes are ignored.
    pub fn put(&mut self, column: usize, row: usize, glyph: u8) {
        if column < SCREEN_WIDTH && row < SCREEN_HEIGHT {
            self.cells[row * SCREEN_WIDTH + column] = glyph;
        }
    }

    /// The screen as text, one line per row.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.cells
            .chunks(SCREEN_WIDTH)
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ScreenBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScreenBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenBuffer")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .finish_non_exhaustive()
    }
}

/// Per-column ray results for one frame, living in the arena.
#[derive(Clone, Copy, Debug)]
pub struct FrameScratch {
    distances: ArenaSlice<u16>,
    hits: ArenaSlice<u8>,
}

impl FrameScratch {
    /// Arena bytes needed for one frame (worst case, with alignment).
    pub const BYTES: usize = SCREEN_WIDTH * (std::mem::size_of::<u16>() + 1) + 1;

    /// Reserves scratch space for one frame.
    ///
    /// Must be called before the game state is touched, so that running
    /// out of arena leaves the state as it was.
    ///
    /// # Errors
    ///
    /// [`SimError::ArenaExhausted`] if the arena cannot hold the frame.
    pub fn reserve(arena: &mut Arena) -> SimResult<Self> {
        if arena.remaining() < Self::BYTES {
            return Err(SimError::ArenaExhausted {
                requested: Self::BYTES,
                remaining: arena.remaining(),
            });
        }
        let exhausted = |arena: &Arena| SimError::ArenaExhausted {
            requested: Self::BYTES,
            remaining: arena.remaining(),
        };
        let distances = arena.alloc::<u16>(SCREEN_WIDTH).ok_or_else(|| exhausted(arena))?;
        let hits = arena.alloc::<u8>(SCREEN_WIDTH).ok_or_else(|| exhausted(arena))?;
        Ok(Self { distances, hits })
    }
}

/// Renders game states into their screen buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScreenCompositor;

impl ScreenCompositor {
    /// Creates a compositor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders `state` into `state.screen`.
    ///
    /// # Errors
    ///
    /// [`SimError::StaleScratch`] if `scratch` came from an earlier
    /// transaction. The screen is not touched in that case.
    pub fn render(
        &self,
        state: &mut GameState,
        scratch: &FrameScratch,
        arena: &mut Arena,
    ) -> SimResult<()> {
        cast_columns(state, scratch, arena)?;

        let distances = arena.slice(&scratch.distances).ok_or(SimError::StaleScratch)?;
        let hits = arena.slice(&scratch.hits).ok_or(SimError::StaleScratch)?;

        state.screen.clear();
        for (column, (&distance, &hit)) in distances.iter().zip(hits).enumerate() {
            if Tile::from_u8(hit).is_some_and(|tile| tile != Tile::Empty) {
                draw_sliver(&mut state.screen, column, distance);
            }
        }
        draw_overlay(state);
        draw_hud(state);
        Ok(())
    }
}

/// Casts one ray per column into the scratch buffers.
fn cast_columns(state: &GameState, scratch: &FrameScratch, arena: &mut Arena) -> SimResult<()> {
    let origin = state.pose.position;
    let heading = state.pose.heading;

    for column in 0..SCREEN_WIDTH {
        let hit = cast_ray(&state.map, origin, heading + column_offset(column));
        arena
            .slice_mut(&scratch.distances)
            .ok_or(SimError::StaleScratch)?[column] = hit.distance;
        arena.slice_mut(&scratch.hits).ok_or(SimError::StaleScratch)?[column] =
            hit.tile.map_or(0, |tile| tile as u8);
    }
    Ok(())
}

/// A vertically centred wall slice.
fn draw_sliver(screen: &mut ScreenBuffer, column: usize, distance: u16) {
    let height = wall_height(distance);
    let top = (VIEW_ROWS - height) / 2;
    let glyph = wall_glyph(distance);
    for row in top..top + height {
        screen.put(column, row, glyph);
    }
}

/// Maps a world tile to a view cell, camera centred on the player.
fn project(state: &GameState, tile: (i32, i32)) -> Option<(usize, usize)> {
    let (px, py) = state.pose.tile();
    let column = usize::try_from(tile.0 - px + PLAYER_COLUMN as i32).ok()?;
    let row = usize::try_from(tile.1 - py + PLAYER_ROW as i32).ok()?;
    (column < SCREEN_WIDTH && row < VIEW_ROWS).then_some((column, row))
}

/// Pickups, bullets, enemies, heading, then the player on top.
fn draw_overlay(state: &mut GameState) {
    let (px, py) = state.pose.tile();
    let half_width = PLAYER_COLUMN as i32;
    let half_height = PLAYER_ROW as i32;
    for y in py - half_height..py - half_height + VIEW_ROWS as i32 {
        for x in px - half_width..px - half_width + SCREEN_WIDTH as i32 {
            if let Some(glyph) = state.map.tile_at(x, y).overlay_glyph() {
                if let Some((column, row)) = project(state, (x, y)) {
                    state.screen.put(column, row, glyph);
                }
            }
        }
    }

    for bullet in state.bullets.as_slice().iter().filter(|b| b.active) {
        if let Some((column, row)) = project(state, bullet.tile()) {
            state.screen.put(column, row, b'*');
        }
    }

    for enemy in state.enemies.as_slice().iter().filter(|e| e.active) {
        if let Some((column, row)) = project(state, enemy.tile()) {
            state.screen.put(column, row, b'E');
        }
    }

    let (column, row, glyph) = match ((state.pose.heading + 45) % 360) / 90 {
        0 => (PLAYER_COLUMN + 1, PLAYER_ROW, b'>'),
        1 => (PLAYER_COLUMN, PLAYER_ROW + 1, b'v'),
        2 => (PLAYER_COLUMN - 1, PLAYER_ROW, b'<'),
        _ => (PLAYER_COLUMN, PLAYER_ROW - 1, b'^'),
    };
    state.screen.put(column, row, glyph);
    state.screen.put(PLAYER_COLUMN, PLAYER_ROW, b'@');
}

/// Status line and message line.
fn draw_hud(state: &mut GameState) {
    let (health, ammo, level) = (state.health, state.ammo, state.level);
    let mut status = state.screen.row_mut(STATUS_ROW);
    // At most 18 bytes; always fits the row.
    let _ = write!(status, "HP:{health:03} AM:{ammo:02} L:{level}");

    let message = if !state.game_over {
        HELP_TEXT
    } else if state.victory {
        VICTORY_TEXT
    } else {
        DEFEAT_TEXT
    };
    let start = if state.game_over {
        (SCREEN_WIDTH - message.len()) / 2
    } else {
        0
    };
    state.screen.row_mut(MESSAGE_ROW)[start..start + message.len()]
        .copy_from_slice(message.as_bytes());
}
