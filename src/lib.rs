//! Cosmic Miner - a falling-crystal arcade catch game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, catch detection, run state)
//! - `wallet`: Coin balance, run settlement, withdrawal math, referral bonuses
//! - `shop`: Item catalog and coin purchases (ships carry coin multipliers)
//! - `persistence`: Versioned JSON profile save/load

pub mod persistence;
pub mod shop;
pub mod sim;
pub mod wallet;

pub use shop::{ShopError, ShopItem, catalog};
pub use sim::{Direction, FieldConfig, GameState, Snapshot};
pub use wallet::{LocalLedger, RunResult, RunSink, Settlement, Wallet};

/// Game configuration constants
pub mod consts {
    /// Play-field dimensions (reference geometry)
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Ship (the player's collector)
    pub const SHIP_SIZE: f32 = 50.0;
    /// Horizontal distance moved per left/right command
    pub const SHIP_STEP: f32 = 40.0;
    /// Ship's fixed distance above the bottom edge of the field
    pub const SHIP_OFFSET: f32 = 30.0;

    /// Crystal defaults
    pub const CRYSTAL_SIZE: f32 = 30.0;
    /// Vertical distance a crystal falls per motion tick
    pub const FALL_STEP: f32 = 5.0;
    /// Height of the catch window above the ship
    pub const CATCH_BAND_DEPTH: f32 = 50.0;
    /// Score awarded per caught crystal
    pub const CATCH_REWARD: u64 = 10;

    /// Reference cadences. The host owns the clock; the sim only defines
    /// what one tick of each kind means.
    pub const SPAWN_INTERVAL_MS: u64 = 800;
    pub const MOTION_INTERVAL_MS: u64 = 50;
    /// Motion ticks per spawn tick when both cadences share one loop
    pub const MOTION_TICKS_PER_SPAWN: u64 = SPAWN_INTERVAL_MS / MOTION_INTERVAL_MS;
}
