//! Integration tests for full simulation runs.

use simdoom_core::Arena;
use simdoom_shared::constants::{SCREEN_WIDTH, VIEW_ROWS};
use simdoom_shared::PlayerAction;
use simdoom_sim::{
    EntitySimulator, Enemy, FrameScratch, GameConfig, GameState, ScreenCompositor, TickReport,
};

const ACTIONS: [PlayerAction; 7] = [
    PlayerAction::Forward,
    PlayerAction::Back,
    PlayerAction::StrafeLeft,
    PlayerAction::StrafeRight,
    PlayerAction::TurnLeft,
    PlayerAction::TurnRight,
    PlayerAction::Fire,
];

/// Deterministic action script (LCG).
struct Script(u32);

impl Script {
    fn next_action(&mut self) -> PlayerAction {
        self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        ACTIONS[(self.0 >> 16) as usize % ACTIONS.len()]
    }
}

fn render(state: &mut GameState) {
    let mut arena = Arena::new(GameConfig::default().arena_capacity);
    arena.begin_transaction();
    let scratch = FrameScratch::reserve(&mut arena).unwrap();
    ScreenCompositor::new()
        .render(state, &scratch, &mut arena)
        .unwrap();
}

fn play(seed: u32, steps: usize) -> GameState {
    let simulator = EntitySimulator::default();
    let mut state = simulator.new_game();
    let mut script = Script(seed);
    for _ in 0..steps {
        let _ = simulator.apply_action(&mut state, script.next_action());
        let _ = simulator.tick(&mut state);
        render(&mut state);
    }
    state
}

#[test]
fn test_invariants_hold_over_long_run() {
    let simulator = EntitySimulator::default();
    let mut state = simulator.new_game();
    let mut script = Script(7);

    for _ in 0..2_000 {
        let _ = simulator.apply_action(&mut state, script.next_action());
        let _ = simulator.tick(&mut state);

        assert!(state.health <= 100);
        assert!(state.ammo <= 99);
        assert!((0..360).contains(&state.pose.heading));
        let (x, y) = state.pose.tile();
        assert!(state.map.is_walkable(x, y), "player inside a wall at ({x}, {y})");
        assert!(state.bullets.active_count() <= 4);
        if state.game_over && !state.victory {
            assert_eq!(state.health, 0);
        }
    }
}

#[test]
fn test_same_script_same_screen() {
    let a = play(42, 300);
    let b = play(42, 300);
    assert_eq!(a.screen, b.screen);
    assert_eq!(a.pose, b.pose);
    assert_eq!(a.frame_count, b.frame_count);
    assert_eq!(a.status_record(), b.status_record());
}

#[test]
fn test_two_bullets_kill_approaching_enemy() {
    let simulator = EntitySimulator::default();
    let mut state = simulator.new_game();
    state.enemies.clear();
    let _ = state.enemies.spawn(Enemy::spawn(10, 2, 2));

    let _ = simulator.apply_action(&mut state, PlayerAction::Fire);
    let _ = simulator.apply_action(&mut state, PlayerAction::Fire);
    assert_eq!(state.ammo, 18);

    let mut total = TickReport::default();
    while state.bullets.active_count() > 0 {
        let report = simulator.tick(&mut state);
        total.hits += report.hits;
        total.kills += report.kills;
    }

    assert_eq!(total.hits, 2);
    assert_eq!(total.kills, 1);
    assert_eq!(state.enemies.active_count(), 0);
    assert_eq!(state.health, 100);
}

#[test]
fn test_killed_enemies_do_not_respawn() {
    let simulator = EntitySimulator::default();
    let mut state = simulator.new_game();
    let before = state.enemies.active_count();
    for enemy in state.enemies.as_mut_slice() {
        enemy.health = 1;
    }
    let first = state.enemies.iter_active().next().map(|(id, _)| id).unwrap();
    if let Some(enemy) = state.enemies.get_mut(first) {
        let _ = enemy.take_hit();
    }
    for _ in 0..50 {
        let _ = simulator.tick(&mut state);
    }
    assert_eq!(state.enemies.active_count(), before - 1);
}

#[test]
fn test_open_room_view_has_walls_at_both_edges() {
    let config = GameConfig {
        starting_level: 0,
        ..GameConfig::default()
    };
    let simulator = EntitySimulator::new(&config);
    let mut state = simulator.new_game();
    state.enemies.clear();
    // Centre of the open room, facing north.
    state.pose.position = simdoom_core::FixedVec::from_tile(16, 16);
    state.pose.rotate(270);
    render(&mut state);

    let column_height = |column: usize| {
        (0..VIEW_ROWS)
            .filter(|&row| state.screen.get(column, row) != Some(b' '))
            .count()
    };
    assert!(column_height(0) > 0);
    assert!(column_height(SCREEN_WIDTH - 1) > 0);
}
