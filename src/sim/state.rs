//! Run state and core simulation types
//!
//! Everything a run needs lives on [`GameState`]; nothing is ambient.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No run active; ticks and snapshots are still legal
    Idle,
    /// Active gameplay
    Running,
}

/// Player movement command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// A falling crystal entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crystal {
    pub id: u32,
    /// x is fixed at spawn; y only ever grows
    pub pos: Vec2,
}

/// Play-field geometry and tuning
///
/// The catch band is derived from ship placement (`ship_offset` above the
/// bottom edge, `band_depth` tall) rather than stored as absolute bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    pub ship_size: f32,
    pub crystal_size: f32,
    /// Horizontal distance per move command
    pub ship_step: f32,
    /// Vertical distance per motion tick
    pub fall_step: f32,
    /// Ship's fixed distance above the bottom edge
    pub ship_offset: f32,
    /// Height of the catch window above the ship
    pub band_depth: f32,
    /// Score per caught crystal
    pub catch_reward: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            ship_size: SHIP_SIZE,
            crystal_size: CRYSTAL_SIZE,
            ship_step: SHIP_STEP,
            fall_step: FALL_STEP,
            ship_offset: SHIP_OFFSET,
            band_depth: CATCH_BAND_DEPTH,
            catch_reward: CATCH_REWARD,
        }
    }
}

impl FieldConfig {
    /// Largest legal ship x
    pub fn max_ship_x(&self) -> f32 {
        self.width - self.ship_size
    }

    /// Lower edge (exclusive) of the catch band in field coordinates
    pub fn band_top(&self) -> f32 {
        self.height - self.ship_offset - self.band_depth
    }

    /// Upper edge (exclusive) of the catch band in field coordinates
    pub fn band_bottom(&self) -> f32 {
        self.height - self.ship_offset
    }
}

/// Read-only view of the field for rendering
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub score: u64,
    pub ship_x: f32,
    /// (id, x, y) per active crystal; ids are stable across ticks
    pub crystals: Vec<(u32, f32, f32)>,
}

/// Complete run state (deterministic, one instance per engine)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: FieldConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: RunPhase,
    /// Score accumulated by the current (or last finished) run
    pub score: u64,
    /// Ship's horizontal position, always in [0, max_ship_x]
    pub ship_x: f32,
    /// Active crystals (sorted by id; spawns are append-only)
    pub crystals: Vec<Crystal>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle engine with the given field and seed
    pub fn new(config: FieldConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Idle,
            score: 0,
            ship_x: config.width / 2.0,
            crystals: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a run, discarding anything left from the previous one
    pub fn start_run(&mut self) {
        self.crystals.clear();
        self.score = 0;
        self.ship_x = self.config.width / 2.0;
        self.phase = RunPhase::Running;
    }

    /// End the run and report the final score
    ///
    /// Idempotent: calling while idle returns the last run's score.
    pub fn stop_run(&mut self) -> u64 {
        self.phase = RunPhase::Idle;
        self.score
    }

    /// Shift the ship one step left or right, clamped to the field
    ///
    /// Legal in any phase; while idle it moves the ship but nothing can
    /// be caught anyway.
    pub fn move_ship(&mut self, dir: Direction) {
        let step = match dir {
            Direction::Left => -self.config.ship_step,
            Direction::Right => self.config.ship_step,
        };
        self.ship_x = (self.ship_x + step).clamp(0.0, self.config.max_ship_x());
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Read-only render state; never mutates
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            ship_x: self.ship_x,
            crystals: self
                .crystals
                .iter()
                .map(|c| (c.id, c.pos.x, c.pos.y))
                .collect(),
        }
    }
}
