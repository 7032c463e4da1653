//! # Game State
//!
//! The single aggregate mutated by commands. Owned by the dispatcher and
//! lent out to the simulator and compositor for the length of one call.

use simdoom_core::{trig, Fixed, FixedVec, SlotPool};
use simdoom_shared::constants::{MAX_BULLETS, MAX_ENEMIES};
use simdoom_shared::StatusRecord;

use crate::compositor::ScreenBuffer;
use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy, ENEMY_ANCHORS};
use crate::world::{WorldMap, PLAYER_SPAWN};

/// Player position and heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Pose {
    /// Position in 8.8 fixed point.
    pub position: FixedVec,
    /// Heading in degrees, always in `0..360` (0 = east, 90 = south).
    pub heading: i32,
}

impl Pose {
    /// A pose on tile `(x, y)` facing `heading`.
    #[must_use]
    pub const fn at_tile(x: i32, y: i32, heading: i32) -> Self {
        Self {
            position: FixedVec::from_tile(x, y),
            heading: trig::normalize(heading),
        }
    }

    /// Tile the player is on.
    #[inline]
    #[must_use]
    pub const fn tile(&self) -> (i32, i32) {
        self.position.tile()
    }

    /// Displacement of `step` along `heading + offset` degrees.
    #[must_use]
    pub fn displacement(&self, step: Fixed, offset: i32) -> FixedVec {
        FixedVec::polar(step, self.heading + offset)
    }

    /// Rotates by `degrees` (positive is clockwise on screen).
    pub fn rotate(&mut self, degrees: i32) {
        self.heading = trig::normalize(self.heading + degrees);
    }
}

/// Everything a game consists of.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Player pose.
    pub pose: Pose,
    /// Player health.
    pub health: u8,
    /// Player ammo.
    pub ammo: u8,
    /// Current level.
    pub level: u8,
    /// Ticks simulated so far.
    pub frame_count: u32,
    /// The game has ended (death or exit).
    pub game_over: bool,
    /// The game ended at the exit.
    pub victory: bool,
    /// The tile grid (pickups are consumed in place).
    pub map: WorldMap,
    /// Enemy pool.
    pub enemies: SlotPool<Enemy, MAX_ENEMIES>,
    /// Bullet pool.
    pub bullets: SlotPool<Bullet, MAX_BULLETS>,
    /// Last rendered frame.
    pub screen: ScreenBuffer,
}

impl GameState {
    /// A fresh game at `config.starting_level`.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let level = config.starting_level;
        let mut enemies = SlotPool::new();
        let count = (2 + usize::from(level)).min(MAX_ENEMIES);
        for i in 0..count {
            let (x, y) = ENEMY_ANCHORS[i % ENEMY_ANCHORS.len()];
            let _ = enemies.spawn(Enemy::spawn(x, y, config.enemy_health));
        }

        Self {
            pose: Pose::at_tile(PLAYER_SPAWN.0, PLAYER_SPAWN.1, 0),
            health: config.starting_health,
            ammo: config.starting_ammo,
            level,
            frame_count: 0,
            game_over: false,
            victory: false,
            map: WorldMap::level(level),
            enemies,
            bullets: SlotPool::new(),
            screen: ScreenBuffer::new(),
        }
    }

    /// The GET_STATUS payload.
    #[must_use]
    pub const fn status_record(&self) -> StatusRecord {
        StatusRecord {
            health: self.health,
            ammo: self.ammo,
            level: self.level,
            game_over: self.game_over as u8,
            victory: self.victory as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_defaults() {
        let state = GameState::new(&GameConfig::default());
        assert_eq!(
            state.status_record(),
            StatusRecord {
                health: 100,
                ammo: 20,
                level: 1,
                game_over: 0,
                victory: 0
            }
        );
        assert_eq!(state.pose.tile(), (2, 2));
        assert_eq!(state.pose.heading, 0);
        assert_eq!(state.enemies.active_count(), 3);
        assert_eq!(state.bullets.active_count(), 0);
    }

    #[test]
    fn test_enemy_count_is_capped() {
        let config = GameConfig {
            starting_level: 9,
            ..GameConfig::default()
        };
        let state = GameState::new(&config);
        assert_eq!(state.enemies.active_count(), MAX_ENEMIES);
        let tiles: Vec<_> = state.enemies.iter_active().map(|(_, e)| e.tile()).collect();
        assert_eq!(tiles[0], tiles[4]);
        assert_eq!(tiles[3], (15, 15));
    }

    #[test]
    fn test_rotation_wraps() {
        let mut pose = Pose::at_tile(2, 2, 0);
        pose.rotate(-90);
        assert_eq!(pose.heading, 270);
        pose.rotate(450);
        assert_eq!(pose.heading, 0);
    }
}
