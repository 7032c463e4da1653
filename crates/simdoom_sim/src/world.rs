//! # World Map
//!
//! A fixed 32×32 tile grid. The border is always Wall and any lookup
//! outside the grid also answers Wall, so neither rays nor entities need
//! their own bounds checks.

use simdoom_shared::constants::{MAP_HEIGHT, MAP_WIDTH};

/// One cell of the world grid.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Open floor.
    #[default]
    Empty = 0,
    /// Solid wall.
    Wall = 1,
    /// Level exit; stepping on it wins the game.
    Exit = 2,
    /// Ammo pickup.
    Ammo = 3,
    /// Health pickup.
    Health = 4,
}

impl Tile {
    /// Converts from the compact byte form.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Empty),
            1 => Some(Self::Wall),
            2 => Some(Self::Exit),
            3 => Some(Self::Ammo),
            4 => Some(Self::Health),
            _ => None,
        }
    }

    /// Returns true if players, enemies and bullets may enter the tile.
    #[inline]
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Returns true for pickups that disappear when stepped on.
    #[inline]
    #[must_use]
    pub const fn is_consumable(self) -> bool {
        matches!(self, Self::Ammo | Self::Health)
    }

    /// Glyph used by the top-down overlay, if the tile has one.
    #[must_use]
    pub const fn overlay_glyph(self) -> Option<u8> {
        match self {
            Self::Exit => Some(b'X'),
            Self::Ammo => Some(b'a'),
            Self::Health => Some(b'+'),
            Self::Empty | Self::Wall => None,
        }
    }
}

/// Level exit position.
pub const EXIT_TILE: (i32, i32) = (30, 30);

/// Ammo pickup positions.
pub const AMMO_TILES: [(i32, i32); 2] = [(5, 5), (27, 5)];

/// Health pickup positions.
pub const HEALTH_TILES: [(i32, i32); 1] = [(5, 27)];

/// Player spawn tile.
pub const PLAYER_SPAWN: (i32, i32) = (2, 2);

/// The tile grid.
#[derive(Clone, PartialEq, Eq)]
pub struct WorldMap {
    tiles: [[Tile; MAP_WIDTH]; MAP_HEIGHT],
}

impl WorldMap {
    /// An empty room enclosed by Wall.
    #[must_use]
    pub fn bordered() -> Self {
        let mut tiles = [[Tile::Empty; MAP_WIDTH]; MAP_HEIGHT];
        for (y, row) in tiles.iter_mut().enumerate() {
            for (x, tile) in row.iter_mut().enumerate() {
                if x == 0 || y == 0 || x == MAP_WIDTH - 1 || y == MAP_HEIGHT - 1 {
                    *tile = Tile::Wall;
                }
            }
        }
        Self { tiles }
    }

    /// Builds the layout for `level`.
    ///
    /// Level 0 is the bare room. Every later level adds a cross of walls
    /// through the middle of the map. All levels place the exit and the
    /// pickups.
    #[must_use]
    pub fn level(level: u8) -> Self {
        let mut map = Self::bordered();
        if level >= 1 {
            for i in 8..=23 {
                map.set_tile(i, 16, Tile::Wall);
                map.set_tile(16, i, Tile::Wall);
            }
        }
        map.set_tile(EXIT_TILE.0, EXIT_TILE.1, Tile::Exit);
        for (x, y) in AMMO_TILES {
            map.set_tile(x, y, Tile::Ammo);
        }
        for (x, y) in HEALTH_TILES {
            map.set_tile(x, y, Tile::Health);
        }
        map
    }

    /// Map width in tiles.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        MAP_WIDTH
    }

    /// Map height in tiles.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        MAP_HEIGHT
    }

    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < MAP_WIDTH)?;
        let y = usize::try_from(y).ok().filter(|&y| y < MAP_HEIGHT)?;
        Some((x, y))
    }

    /// The tile at `(x, y)`; Wall outside the grid.
    #[inline]
    #[must_use]
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        Self::index(x, y).map_or(Tile::Wall, |(x, y)| self.tiles[y][x])
    }

    /// Returns true if `(x, y)` can be entered.
    #[inline]
    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_walkable()
    }

    /// Overwrites a cell. Returns false (and does nothing) outside the grid.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        match Self::index(x, y) {
            Some((x, y)) => {
                self.tiles[y][x] = tile;
                true
            }
            None => false,
        }
    }

    /// Takes the pickup at `(x, y)`, leaving Empty behind.
    ///
    /// Returns the consumed tile, or `None` if the cell held nothing
    /// consumable.
    pub fn consume(&mut self, x: i32, y: i32) -> Option<Tile> {
        let tile = self.tile_at(x, y);
        if !tile.is_consumable() {
            return None;
        }
        self.set_tile(x, y, Tile::Empty);
        Some(tile)
    }
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::level(1)
    }
}

impl std::fmt::Debug for WorldMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let walls = self.tiles.iter().flatten().filter(|t| **t == Tile::Wall).count();
        f.debug_struct("WorldMap")
            .field("width", &MAP_WIDTH)
            .field("height", &MAP_HEIGHT)
            .field("walls", &walls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_wall() {
        let map = WorldMap::bordered();
        for (x, y) in [(-1, 5), (5, -1), (32, 0), (0, 32), (i32::MIN, i32::MAX), (1000, 1000)] {
            assert_eq!(map.tile_at(x, y), Tile::Wall, "({x}, {y})");
        }
    }

    #[test]
    fn test_border_is_wall() {
        let map = WorldMap::level(1);
        for i in 0..32 {
            assert_eq!(map.tile_at(i, 0), Tile::Wall);
            assert_eq!(map.tile_at(i, 31), Tile::Wall);
            assert_eq!(map.tile_at(0, i), Tile::Wall);
            assert_eq!(map.tile_at(31, i), Tile::Wall);
        }
    }

    #[test]
    fn test_level_one_layout() {
        let map = WorldMap::level(1);
        assert_eq!(map.tile_at(16, 16), Tile::Wall);
        assert_eq!(map.tile_at(8, 16), Tile::Wall);
        assert_eq!(map.tile_at(16, 23), Tile::Wall);
        assert_eq!(map.tile_at(7, 16), Tile::Empty);
        assert_eq!(map.tile_at(30, 30), Tile::Exit);
        assert_eq!(map.tile_at(5, 5), Tile::Ammo);
        assert_eq!(map.tile_at(5, 27), Tile::Health);
        assert_eq!(map.tile_at(2, 2), Tile::Empty);
    }

    #[test]
    fn test_consume_once() {
        let mut map = WorldMap::level(1);
        assert_eq!(map.consume(5, 5), Some(Tile::Ammo));
        assert_eq!(map.tile_at(5, 5), Tile::Empty);
        assert_eq!(map.consume(5, 5), None);
        assert_eq!(map.consume(30, 30), None);
        assert_eq!(map.tile_at(30, 30), Tile::Exit);
    }

    #[test]
    fn test_set_tile_outside_grid() {
        let mut map = WorldMap::bordered();
        assert!(!map.set_tile(-1, 3, Tile::Empty));
        assert!(map.set_tile(3, 3, Tile::Wall));
        assert!(!map.is_walkable(3, 3));
    }
}
