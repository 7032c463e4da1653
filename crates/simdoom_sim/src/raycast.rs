//! # Ray Caster
//!
//! Marches one ray per screen column through the [`WorldMap`] in fixed
//! 1/8-tile steps. The loop bound is a constant, so every ray terminates
//! after at most [`MAX_RAY_STEPS`] lookups regardless of the map.
//!
//! Distances are in 1/256 tiles, like [`Fixed`](simdoom_core::Fixed).

use simdoom_core::{trig, FixedVec};
use simdoom_shared::constants::{SCREEN_WIDTH, VIEW_ROWS};

use crate::world::{Tile, WorldMap};

/// Distance covered by one march step (1/8 tile).
pub const RAY_STEP: u16 = 32;

/// Distance cap (20 tiles).
pub const MAX_RAY_DISTANCE: u16 = 20 * 256;

/// Upper bound on march steps per ray.
pub const MAX_RAY_STEPS: u16 = MAX_RAY_DISTANCE / RAY_STEP;

/// `height = WALL_SCALE / distance`.
pub const WALL_SCALE: u32 = 40_960;

/// Extra fraction bits used while marching.
const MARCH_SHIFT: u32 = 8;

/// Result of one ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RayHit {
    /// Distance travelled, capped at [`MAX_RAY_DISTANCE`].
    pub distance: u16,
    /// First non-Empty tile reached, or `None` if the cap was hit first.
    pub tile: Option<Tile>,
}

/// Angle offset of a screen column from the view heading, one degree
/// per column, centred on the middle column.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn column_offset(column: usize) -> i32 {
    column as i32 - (SCREEN_WIDTH / 2) as i32
}

/// Casts a ray from `origin` along `angle` degrees.
///
/// Stops on the first tile that is not Empty: exits and pickups block the
/// ray exactly like walls.
#[must_use]
pub fn cast_ray(map: &WorldMap, origin: FixedVec, angle: i32) -> RayHit {
    let dx = trig::cos(angle) * i32::from(RAY_STEP);
    let dy = trig::sin(angle) * i32::from(RAY_STEP);
    let mut x = origin.x.raw() << MARCH_SHIFT;
    let mut y = origin.y.raw() << MARCH_SHIFT;

    let shift = MARCH_SHIFT + simdoom_core::Fixed::FRAC_BITS;
    for step in 1..=MAX_RAY_STEPS {
        x += dx;
        y += dy;
        let tile = map.tile_at(x >> shift, y >> shift);
        if tile != Tile::Empty {
            return RayHit {
                distance: step * RAY_STEP,
                tile: Some(tile),
            };
        }
    }

    RayHit {
        distance: MAX_RAY_DISTANCE,
        tile: None,
    }
}

/// On-screen height of a wall slice at `distance`, clamped to the view.
#[must_use]
pub fn wall_height(distance: u16) -> usize {
    let height = WALL_SCALE / u32::from(distance.max(1));
    usize::try_from(height).map_or(VIEW_ROWS, |h| h.min(VIEW_ROWS))
}

/// Shading glyph for a wall slice at `distance`.
#[must_use]
pub const fn wall_glyph(distance: u16) -> u8 {
    match distance {
        0..=1279 => b'#',
        1280..=2559 => b'=',
        2560..=3839 => b'-',
        _ => b'.',
    }
}
