//! Bullets and enemies.

use simdoom_core::{FixedVec, Slot};

/// Quadrant anchors where enemies spawn; slot `i` uses anchor `i % 4`.
pub const ENEMY_ANCHORS: [(i32, i32); 4] = [(25, 5), (5, 25), (25, 25), (15, 15)];

/// A bullet in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bullet {
    /// Current position.
    pub position: FixedVec,
    /// Displacement per tick.
    pub velocity: FixedVec,
    /// Slot is in use.
    pub active: bool,
}

impl Bullet {
    /// A freshly fired bullet.
    #[must_use]
    pub const fn fired(position: FixedVec, velocity: FixedVec) -> Self {
        Self {
            position,
            velocity,
            active: true,
        }
    }

    /// Tile the bullet is in.
    #[inline]
    #[must_use]
    pub const fn tile(&self) -> (i32, i32) {
        self.position.tile()
    }
}

impl Slot for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// A pursuing enemy. Enemies move a whole tile at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Enemy {
    /// Current position (tile corner).
    pub position: FixedVec,
    /// Remaining hit points.
    pub health: u8,
    /// Ticks since the last step.
    pub move_timer: u8,
    /// Slot is in use.
    pub active: bool,
}

impl Enemy {
    /// An enemy standing on tile `(x, y)`.
    #[must_use]
    pub const fn spawn(x: i32, y: i32, health: u8) -> Self {
        Self {
            position: FixedVec::from_tile(x, y),
            health,
            move_timer: 0,
            active: true,
        }
    }

    /// Tile the enemy is on.
    #[inline]
    #[must_use]
    pub const fn tile(&self) -> (i32, i32) {
        self.position.tile()
    }

    /// Applies one bullet hit. Returns true if the enemy died.
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.active = false;
        }
        !self.active
    }
}

impl Slot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// One unit step from `current` toward `target` on a single axis.
///
/// Returns -1, 0 or +1.
#[inline]
#[must_use]
pub const fn step_toward(current: i32, target: i32) -> i32 {
    if current < target {
        1
    } else if current > target {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_toward() {
        assert_eq!(step_toward(3, 10), 1);
        assert_eq!(step_toward(10, 3), -1);
        assert_eq!(step_toward(7, 7), 0);
        assert_eq!(step_toward(i32::MIN, i32::MAX), 1);
    }

    #[test]
    fn test_enemy_dies_at_zero() {
        let mut enemy = Enemy::spawn(5, 5, 2);
        assert!(!enemy.take_hit());
        assert!(enemy.is_active());
        assert!(enemy.take_hit());
        assert!(!enemy.is_active());
        assert_eq!(enemy.health, 0);
    }

    #[test]
    fn test_spawn_on_tile() {
        assert_eq!(Enemy::spawn(25, 5, 2).tile(), (25, 5));
        assert_eq!(Bullet::default().tile(), (0, 0));
        assert!(!Bullet::default().is_active());
    }
}
