//! Cosmic Miner entry point
//!
//! Headless demo host: drives the engine's two cadences from one loop,
//! auto-pilots the ship, then settles the run into the local ledger.

use std::path::PathBuf;

use cosmic_miner::consts::MOTION_TICKS_PER_SPAWN;
use cosmic_miner::sim::{Direction, FieldConfig, GameState, tick_motion, tick_spawn};
use cosmic_miner::wallet::{RunResult, RunSink};
use cosmic_miner::{LocalLedger, Wallet};

/// Demo run length in motion ticks (50 ms each -> one minute of game time)
const DEMO_MOTION_TICKS: u64 = 1_200;

fn profile_path() -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push("cosmic_miner_profile.json");
    p
}

/// Step toward the crystal closest to the catch band, if any
fn autopilot(state: &mut GameState) {
    let target = state
        .crystals
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|c| c.pos.x);

    if let Some(x) = target {
        if x < state.ship_x - state.config.ship_step / 2.0 {
            state.move_ship(Direction::Left);
        } else if x > state.ship_x + state.config.ship_step / 2.0 {
            state.move_ship(Direction::Right);
        }
    }
}

fn log_wallet(wallet: &Wallet) {
    log::info!(
        "wallet: {} coins ({:.2} USDT), high score {}",
        wallet.coins,
        wallet.usdt_value(),
        wallet.high_score
    );
    if wallet.can_withdraw() {
        log::info!("withdrawal unlocked");
    } else {
        log::info!(
            "{} more coins until withdrawal unlocks",
            wallet.coins_until_withdraw()
        );
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0541C);

    let mut ledger = LocalLedger::open(profile_path());
    log_wallet(ledger.wallet());

    let config = FieldConfig::default();
    let mut state = GameState::new(config, seed);
    state.start_run();
    log::info!("run started (seed {seed})");

    // The real app fires these from two 800ms/50ms timers; one loop with a
    // spawn every 16th motion tick is the same schedule.
    for tick in 0..DEMO_MOTION_TICKS {
        if tick % MOTION_TICKS_PER_SPAWN == 0 {
            tick_spawn(&mut state);
        }
        autopilot(&mut state);
        tick_motion(&mut state);

        if tick % 100 == 0 {
            let snap = state.snapshot();
            log::debug!(
                "tick {tick}: score {}, ship at {:.0}, {} crystals falling",
                snap.score,
                snap.ship_x,
                snap.crystals.len()
            );
        }
    }

    let score = state.stop_run();
    let result = RunResult::from_score(score, config.catch_reward);
    log::info!(
        "run over: score {score}, {} crystals caught",
        result.crystals_collected
    );

    match ledger.submit(&result) {
        Ok(settlement) => {
            log::info!(
                "settled: +{} coins (base {}), balance {}{}",
                settlement.coins_earned,
                settlement.base_coins,
                settlement.total_coins,
                if settlement.new_high_score {
                    ", new high score!"
                } else {
                    ""
                }
            );
        }
        Err(e) => log::error!("settlement failed: {e}"),
    }

    log_wallet(ledger.wallet());
}
