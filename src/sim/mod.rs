//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only (the host owns the wall clock)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{in_catch_band, ship_catches};
pub use state::{Crystal, Direction, FieldConfig, GameState, RunPhase, Snapshot};
pub use tick::{tick_motion, tick_spawn};
