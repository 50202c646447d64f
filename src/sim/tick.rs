//! Discrete simulation ticks
//!
//! Two independent cadences drive a run: a spawn tick (one new crystal) and
//! a motion tick (advance, catch, despawn). The host schedules them; the
//! reference rates are 800 ms and 50 ms. Both are no-ops while idle, so a
//! timer that fires late, after `stop_run`, cannot corrupt anything.

use glam::Vec2;
use rand::Rng;

use super::collision::ship_catches;
use super::state::{Crystal, GameState};

/// Spawn tick: append exactly one crystal at the top of the field
///
/// Horizontal position is uniform in `[0, width - crystal_size)` so the
/// crystal always fits inside the field.
pub fn tick_spawn(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    // A crystal wider than the field leaves no legal range; pin such
    // spawns to x = 0 instead of panicking on an empty range
    let max_x = (state.config.width - state.config.crystal_size).max(f32::EPSILON);
    let x = state.rng.random_range(0.0..max_x);
    let id = state.next_entity_id();
    state.crystals.push(Crystal {
        id,
        pos: Vec2::new(x, 0.0),
    });
}

/// Motion tick: advance every crystal, resolve catches, drop misses
///
/// Per crystal, in one pass: fall by `fall_step`, then the catch test, then
/// the off-field test. The catch test runs strictly first, so a crystal can
/// never be counted as missed on the tick it is caught. Crystals are
/// independent; several may be caught in the same tick and each pays the
/// full reward.
pub fn tick_motion(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    let config = state.config;
    let ship_x = state.ship_x;
    let mut caught: u64 = 0;

    state.crystals.retain_mut(|c| {
        c.pos.y += config.fall_step;
        if ship_catches(c.pos.x, c.pos.y, ship_x, &config) {
            caught += 1;
            return false;
        }
        if c.pos.y > config.height {
            // Missed, off the bottom of the field
            return false;
        }
        true
    });

    state.score += caught * config.catch_reward;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Direction, FieldConfig, RunPhase};

    fn new_run(seed: u64) -> GameState {
        let mut state = GameState::new(FieldConfig::default(), seed);
        state.start_run();
        state
    }

    /// Place one crystal by hand, bypassing the RNG
    fn inject_crystal(state: &mut GameState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.crystals.push(Crystal {
            id,
            pos: Vec2::new(x, y),
        });
        id
    }

    #[test]
    fn test_spawn_appends_one_in_bounds() {
        let mut state = new_run(42);
        for i in 1..=50 {
            tick_spawn(&mut state);
            assert_eq!(state.crystals.len(), i);
        }
        let max_x = state.config.width - state.config.crystal_size;
        for c in &state.crystals {
            assert!(c.pos.x >= 0.0 && c.pos.x < max_x);
            assert_eq!(c.pos.y, 0.0);
        }
        // IDs unique and ascending
        for pair in state.crystals.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[test]
    fn test_spawn_handles_oversized_crystal() {
        let config = FieldConfig {
            width: 30.0,
            crystal_size: 40.0,
            ..FieldConfig::default()
        };
        let mut state = GameState::new(config, 3);
        state.start_run();
        for _ in 0..20 {
            tick_spawn(&mut state);
        }
        assert_eq!(state.crystals.len(), 20);
        for c in &state.crystals {
            assert!(c.pos.x >= 0.0 && c.pos.x < f32::EPSILON);
        }
    }

    #[test]
    fn test_motion_advances_by_fall_step() {
        let mut state = new_run(42);
        // Park the ship far away so nothing gets caught
        for _ in 0..10 {
            state.move_ship(Direction::Left);
        }
        inject_crystal(&mut state, 350.0, 0.0);
        let mut prev = 0.0;
        for _ in 0..50 {
            tick_motion(&mut state);
            let y = state.crystals[0].pos.y;
            assert_eq!(y, prev + state.config.fall_step);
            prev = y;
        }
    }

    /// Reference scenario: 400x500 field, crystal at x=200, ship at x=200.
    /// The band is (420, 470); falling 5 per tick, the crystal first enters
    /// it at y=425 on tick 85 and must be caught exactly then.
    #[test]
    fn test_catch_on_band_entry_tick() {
        let mut state = new_run(1);
        assert_eq!(state.ship_x, 200.0);
        inject_crystal(&mut state, 200.0, 0.0);

        for tick in 1..=84 {
            tick_motion(&mut state);
            assert_eq!(state.score, 0, "caught too early on tick {tick}");
            assert_eq!(state.crystals.len(), 1);
        }

        // Tick 85: y reaches 425, inside (420, 470)
        tick_motion(&mut state);
        assert_eq!(state.score, 10);
        assert!(state.crystals.is_empty());

        // Nothing left to catch; score must not move again
        for _ in 0..50 {
            tick_motion(&mut state);
        }
        assert_eq!(state.score, 10);
        assert!(state.crystals.is_empty());
    }

    /// Same drop with the ship parked at x=0: distance 200 >= 50, so the
    /// crystal falls through the band and is removed once past the bottom.
    #[test]
    fn test_miss_removed_off_field() {
        let mut state = new_run(1);
        while state.ship_x > 0.0 {
            state.move_ship(Direction::Left);
        }
        inject_crystal(&mut state, 200.0, 0.0);

        // y = 500 on tick 100: still on-field (strict bound)
        for _ in 0..100 {
            tick_motion(&mut state);
        }
        assert_eq!(state.crystals.len(), 1);
        assert_eq!(state.crystals[0].pos.y, 500.0);

        // Tick 101: y = 505 > 500, gone with no score
        tick_motion(&mut state);
        assert!(state.crystals.is_empty());
        assert_eq!(state.score, 0);
    }

    /// With a catch band hanging past the bottom edge, a crystal can be
    /// both catchable and off-field on the same tick; the catch wins.
    #[test]
    fn test_catch_beats_off_field_removal() {
        let config = FieldConfig {
            ship_offset: -20.0,
            ..FieldConfig::default()
        };
        // Band is (470, 520); field bottom is 500
        let mut state = GameState::new(config, 1);
        state.start_run();
        let ship_x = state.ship_x;
        inject_crystal(&mut state, ship_x, 500.0);

        // y -> 505: past the bottom AND inside the band
        tick_motion(&mut state);
        assert_eq!(state.score, state.config.catch_reward);
        assert!(state.crystals.is_empty());
    }

    #[test]
    fn test_simultaneous_catches_are_additive() {
        let mut state = new_run(1);
        // Both enter the band on the next tick and sit within one ship width
        inject_crystal(&mut state, 180.0, 420.0);
        inject_crystal(&mut state, 230.0, 420.0);
        tick_motion(&mut state);
        assert_eq!(state.score, 20);
        assert!(state.crystals.is_empty());
    }

    #[test]
    fn test_ticks_are_noops_while_idle() {
        let mut state = new_run(9);
        inject_crystal(&mut state, 100.0, 50.0);
        state.score = 40;
        let final_score = state.stop_run();
        assert_eq!(final_score, 40);

        let before = state.clone();
        tick_spawn(&mut state);
        tick_motion(&mut state);
        assert_eq!(state.phase, RunPhase::Idle);
        assert_eq!(state.score, before.score);
        assert_eq!(state.crystals, before.crystals);
    }

    #[test]
    fn test_determinism_under_fixed_seed() {
        let mut a = new_run(99999);
        let mut b = new_run(99999);
        for i in 0..200u64 {
            if i % crate::consts::MOTION_TICKS_PER_SPAWN == 0 {
                tick_spawn(&mut a);
                tick_spawn(&mut b);
            }
            tick_motion(&mut a);
            tick_motion(&mut b);
            if i % 3 == 0 {
                a.move_ship(Direction::Right);
                b.move_ship(Direction::Right);
            }
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.crystals, b.crystals);
        assert_eq!(a.ship_x, b.ship_x);
    }
}
