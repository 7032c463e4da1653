//! # Entity Simulator
//!
//! Applies player actions immediately and advances the world one tick at
//! a time.
//!
//! ## Tick order
//!
//! 1. Bullets move, then hit a wall or the first enemy on their tile
//! 2. Enemies count down their throttle, step toward the player, and deal
//!    contact damage
//!
//! Bullets always resolve before enemies move, so an enemy killed this tick
//! never gets to attack. Pickups are not part of the tick: they are taken
//! as a side effect of a successful player move.

use simdoom_core::{Fixed, FixedVec, SlotId};
use simdoom_shared::PlayerAction;

use crate::config::GameConfig;
use crate::entities::{step_toward, Bullet};
use crate::state::GameState;
use crate::world::Tile;

/// What a player action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The player moved onto an ordinary tile.
    Moved,
    /// The destination was a wall; nothing changed.
    Blocked,
    /// The player moved and took a pickup.
    PickedUp(Tile),
    /// The player moved onto the exit and won.
    ReachedExit,
    /// The heading changed.
    Turned,
    /// A bullet was spawned in this slot.
    Fired(SlotId),
    /// No ammo or no free bullet slot; nothing changed.
    FireRejected,
    /// The game is over; nothing changed.
    Ignored,
}

/// What one tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Bullets that hit an enemy.
    pub hits: u8,
    /// Enemies killed.
    pub kills: u8,
    /// Health the player lost.
    pub damage_taken: u8,
}

/// Runs game rules against a [`GameState`].
#[derive(Clone, Debug)]
pub struct EntitySimulator {
    config: GameConfig,
}

impl EntitySimulator {
    /// Creates a simulator with the given tuning.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// The tuning in use.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A fresh game using this simulator's tuning.
    #[must_use]
    pub fn new_game(&self) -> GameState {
        GameState::new(&self.config)
    }

    /// Applies one player action. Does nothing once the game is over.
    pub fn apply_action(&self, state: &mut GameState, action: PlayerAction) -> ActionOutcome {
        if state.game_over {
            return ActionOutcome::Ignored;
        }

        let step = Fixed::from_raw(self.config.move_step);
        let forward = state.pose.displacement(step, 0);
        match action {
            PlayerAction::Forward => self.try_move(state, forward),
            PlayerAction::Back => self.try_move(state, -forward),
            PlayerAction::StrafeLeft => {
                let delta = state.pose.displacement(step, -90);
                self.try_move(state, delta)
            }
            PlayerAction::StrafeRight => {
                let delta = state.pose.displacement(step, 90);
                self.try_move(state, delta)
            }
            PlayerAction::TurnLeft => {
                state.pose.rotate(-self.config.turn_increment);
                ActionOutcome::Turned
            }
            PlayerAction::TurnRight => {
                state.pose.rotate(self.config.turn_increment);
                ActionOutcome::Turned
            }
            PlayerAction::Fire => self.fire(state),
        }
    }

    /// Moves the player by `delta` unless the destination is a wall.
    ///
    /// The move is all-or-nothing: a blocked move leaves the pose as it was.
    pub fn try_move(&self, state: &mut GameState, delta: FixedVec) -> ActionOutcome {
        let destination = state.pose.position + delta;
        let (x, y) = destination.tile();
        let tile = state.map.tile_at(x, y);
        if !tile.is_walkable() {
            tracing::trace!(x, y, "move blocked");
            return ActionOutcome::Blocked;
        }

        state.pose.position = destination;
        match tile {
            Tile::Exit => {
                state.victory = true;
                state.game_over = true;
                tracing::debug!(frame = state.frame_count, "exit reached");
                ActionOutcome::ReachedExit
            }
            Tile::Ammo | Tile::Health => {
                let _ = state.map.consume(x, y);
                if tile == Tile::Ammo {
                    state.ammo = state
                        .ammo
                        .saturating_add(self.config.ammo_pickup)
                        .min(self.config.max_ammo);
                } else {
                    state.health = state
                        .health
                        .saturating_add(self.config.health_pickup)
                        .min(self.config.max_health);
                }
                tracing::debug!(?tile, health = state.health, ammo = state.ammo, "pickup");
                ActionOutcome::PickedUp(tile)
            }
            Tile::Empty | Tile::Wall => ActionOutcome::Moved,
        }
    }

    /// Fires a bullet along the heading from the player's position.
    ///
    /// With no ammo or a full bullet pool the request is dropped and ammo
    /// is untouched.
    pub fn fire(&self, state: &mut GameState) -> ActionOutcome {
        if state.game_over {
            return ActionOutcome::Ignored;
        }
        if state.ammo == 0 {
            return ActionOutcome::FireRejected;
        }

        let velocity = state
            .pose
            .displacement(Fixed::from_raw(self.config.bullet_speed), 0);
        match state.bullets.spawn(Bullet::fired(state.pose.position, velocity)) {
            Some(slot) => {
                state.ammo -= 1;
                tracing::trace!(slot = slot.index(), ammo = state.ammo, "bullet fired");
                ActionOutcome::Fired(slot)
            }
            None => ActionOutcome::FireRejected,
        }
    }

    /// Advances the world by one tick. Does nothing once the game is over.
    pub fn tick(&self, state: &mut GameState) -> TickReport {
        let mut report = TickReport::default();
        if state.game_over {
            return report;
        }

        state.frame_count = state.frame_count.wrapping_add(1);
        Self::update_bullets(state, &mut report);
        self.update_enemies(state, &mut report);
        report
    }

    fn update_bullets(state: &mut GameState, report: &mut TickReport) {
        for bullet in state.bullets.as_mut_slice().iter_mut().filter(|b| b.active) {
            bullet.position += bullet.velocity;
            let (bx, by) = bullet.tile();
            if !state.map.is_walkable(bx, by) {
                bullet.active = false;
                continue;
            }

            let target = state
                .enemies
                .as_mut_slice()
                .iter_mut()
                .find(|enemy| enemy.active && enemy.tile() == (bx, by));
            if let Some(enemy) = target {
                bullet.active = false;
                report.hits += 1;
                if enemy.take_hit() {
                    report.kills += 1;
                    tracing::debug!(x = bx, y = by, frame = state.frame_count, "enemy killed");
                }
            }
        }
    }

    fn update_enemies(&self, state: &mut GameState, report: &mut TickReport) {
        let (px, py) = state.pose.tile();
        let damage = self.config.enemy_damage;

        for enemy in state.enemies.as_mut_slice().iter_mut().filter(|e| e.active) {
            enemy.move_timer = enemy.move_timer.saturating_add(1);
            if enemy.move_timer < self.config.enemy_move_interval {
                continue;
            }
            enemy.move_timer = 0;

            let (ex, ey) = enemy.tile();
            let (nx, ny) = (ex + step_toward(ex, px), ey + step_toward(ey, py));
            if (nx, ny) != (ex, ey) && state.map.is_walkable(nx, ny) {
                enemy.position = FixedVec::from_tile(nx, ny);
            }

            if enemy.tile() != (px, py) {
                continue;
            }
            if state.health <= damage {
                report.damage_taken += state.health;
                state.health = 0;
                state.game_over = true;
                tracing::debug!(frame = state.frame_count, "player died");
                break;
            }
            state.health -= damage;
            report.damage_taken += damage;
            tracing::trace!(health = state.health, "player hit");
        }
    }
}

impl Default for EntitySimulator {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Enemy;

    fn setup() -> (EntitySimulator, GameState) {
        let sim = EntitySimulator::default();
        let state = sim.new_game();
        (sim, state)
    }

    #[test]
    fn test_forward_moves_half_tile() {
        let (sim, mut state) = setup();
        assert_eq!(sim.apply_action(&mut state, PlayerAction::Forward), ActionOutcome::Moved);
        assert_eq!(state.pose.position.x.raw(), 2 * 256 + 128);
        assert_eq!(state.pose.position.y.raw(), 2 * 256);
    }

    #[test]
    fn test_move_into_wall_keeps_pose() {
        let (sim, mut state) = setup();
        state.pose.rotate(180);
        // x = 2.0 -> 1.5 -> 1.0 are fine, 0.5 is the border.
        let _ = sim.apply_action(&mut state, PlayerAction::Forward);
        let _ = sim.apply_action(&mut state, PlayerAction::Forward);
        let before = state.pose;
        assert_eq!(sim.apply_action(&mut state, PlayerAction::Forward), ActionOutcome::Blocked);
        assert_eq!(state.pose, before);
    }

    #[test]
    fn test_strafe_is_perpendicular() {
        let (sim, mut state) = setup();
        let start = state.pose.position;
        let _ = sim.apply_action(&mut state, PlayerAction::StrafeRight);
        assert_eq!(state.pose.position.x, start.x);
        assert_eq!(state.pose.position.y.raw(), start.y.raw() + 128);
        assert_eq!(state.pose.heading, 0);
    }

    #[test]
    fn test_four_turns_restore_heading() {
        let (sim, mut state) = setup();
        for _ in 0..4 {
            assert_eq!(sim.apply_action(&mut state, PlayerAction::TurnRight), ActionOutcome::Turned);
        }
        assert_eq!(state.pose.heading, 0);
        let _ = sim.apply_action(&mut state, PlayerAction::TurnLeft);
        assert_eq!(state.pose.heading, 270);
    }

    #[test]
    fn test_pickups_are_capped_and_consumed() {
        let (sim, mut state) = setup();
        state.ammo = 95;
        state.health = 90;
        state.pose.position = FixedVec::from_tile(4, 5);
        assert_eq!(
            sim.apply_action(&mut state, PlayerAction::Forward),
            ActionOutcome::Moved
        );
        assert_eq!(
            sim.apply_action(&mut state, PlayerAction::Forward),
            ActionOutcome::PickedUp(Tile::Ammo)
        );
        assert_eq!(state.ammo, 99);
        assert_eq!(state.map.tile_at(5, 5), Tile::Empty);

        state.pose.position = FixedVec::from_tile(5, 26);
        state.pose.rotate(90);
        let _ = sim.apply_action(&mut state, PlayerAction::Forward);
        assert_eq!(
            sim.apply_action(&mut state, PlayerAction::Forward),
            ActionOutcome::PickedUp(Tile::Health)
        );
        assert_eq!(state.health, 100);
    }

    #[test]
    fn test_fire_without_ammo_does_nothing() {
        let (sim, mut state) = setup();
        state.ammo = 0;
        assert_eq!(sim.apply_action(&mut state, PlayerAction::Fire), ActionOutcome::FireRejected);
        assert_eq!(state.ammo, 0);
        assert_eq!(state.bullets.active_count(), 0);
    }

    #[test]
    fn test_full_bullet_pool_drops_request() {
        let (sim, mut state) = setup();
        for _ in 0..4 {
            assert!(matches!(sim.fire(&mut state), ActionOutcome::Fired(_)));
        }
        assert_eq!(sim.fire(&mut state), ActionOutcome::FireRejected);
        assert_eq!(state.ammo, 16);
    }

    #[test]
    fn test_bullet_hits_first_enemy_on_tile() {
        let (sim, mut state) = setup();
        state.enemies.clear();
        let _ = state.enemies.spawn(Enemy::spawn(4, 2, 2));
        let _ = state.enemies.spawn(Enemy::spawn(4, 2, 2));
        let _ = sim.fire(&mut state);

        let mut report = TickReport::default();
        for _ in 0..2 {
            let tick = sim.tick(&mut state);
            report.hits += tick.hits;
        }
        assert_eq!(report.hits, 1);
        let healths: Vec<u8> = state.enemies.iter_active().map(|(_, e)| e.health).collect();
        assert_eq!(healths, vec![1, 2]);
        assert_eq!(state.bullets.active_count(), 0);
    }

    #[test]
    fn test_bullet_stops_at_wall() {
        let (sim, mut state) = setup();
        state.enemies.clear();
        state.pose.rotate(180);
        let _ = sim.fire(&mut state);
        let _ = sim.tick(&mut state);
        assert_eq!(state.bullets.active_count(), 1);
        let _ = sim.tick(&mut state);
        let _ = sim.tick(&mut state);
        assert_eq!(state.bullets.active_count(), 0);
    }

    #[test]
    fn test_enemy_steps_diagonally_on_throttle() {
        let (sim, mut state) = setup();
        state.enemies.clear();
        let id = state.enemies.spawn(Enemy::spawn(6, 6, 2)).unwrap();
        for _ in 0..3 {
            let _ = sim.tick(&mut state);
        }
        assert_eq!(state.enemies.get(id).unwrap().tile(), (6, 6));
        let _ = sim.tick(&mut state);
        assert_eq!(state.enemies.get(id).unwrap().tile(), (5, 5));
        assert_eq!(state.enemies.get(id).unwrap().move_timer, 0);
    }

    #[test]
    fn test_blocked_enemy_step_is_skipped() {
        let (sim, mut state) = setup();
        state.enemies.clear();
        let id = state.enemies.spawn(Enemy::spawn(17, 17, 2)).unwrap();
        // (16, 16) is the centre of the cross.
        for _ in 0..4 {
            let _ = sim.tick(&mut state);
        }
        assert_eq!(state.enemies.get(id).unwrap().tile(), (17, 17));
    }

    #[test]
    fn test_contact_damage_and_death() {
        let (sim, mut state) = setup();
        state.enemies.clear();
        let _ = state.enemies.spawn(Enemy::spawn(3, 3, 2));
        state.health = 15;
        for _ in 0..4 {
            let _ = sim.tick(&mut state);
        }
        assert_eq!(state.health, 5);
        assert!(!state.game_over);

        for _ in 0..4 {
            let _ = sim.tick(&mut state);
        }
        assert_eq!(state.health, 0);
        assert!(state.game_over);
        assert!(!state.victory);

        let frames = state.frame_count;
        assert_eq!(sim.tick(&mut state), TickReport::default());
        assert_eq!(state.frame_count, frames);
        assert_eq!(sim.apply_action(&mut state, PlayerAction::Forward), ActionOutcome::Ignored);
    }

    #[test]
    fn test_damage_stops_after_death_in_same_tick() {
        let (sim, mut state) = setup();
        state.enemies.clear();
        for _ in 0..3 {
            let _ = state.enemies.spawn(Enemy::spawn(2, 2, 2));
        }
        state.health = 10;
        for _ in 0..4 {
            let _ = sim.tick(&mut state);
        }
        assert_eq!(state.health, 0);
        assert!(state.game_over);
    }
}
