//! Coin economy: run settlement, withdrawal math, referral bonuses
//!
//! The sim reports a [`RunResult`] delta when a run ends; the wallet owns the
//! durable merge into coins, lifetime earnings, and the high score. Paths
//! that touch a remote economy go through the [`RunSink`] trait so the local
//! ledger and a future HTTP backend are interchangeable to the host.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Profile, StoreError};

/// Coins granted to every new profile
pub const WELCOME_BONUS: u64 = 100;
/// Coins granted to the inviter when a referred player joins
pub const REFERRAL_BONUS_INVITER: u64 = 200;
/// Extra welcome coins for joining with a referral code
pub const REFERRAL_BONUS_INVITED: u64 = 50;
/// Minimum balance before a withdrawal can be requested
pub const MIN_WITHDRAW_COINS: u64 = 10_000;
/// Exchange rate: coins per 1 USDT
pub const COINS_PER_USDT: u64 = 1_000;

/// What a finished run reports downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub coins_earned: u64,
    pub crystals_collected: u32,
}

impl RunResult {
    /// Derive a result from a final score and the per-crystal reward
    pub fn from_score(score: u64, catch_reward: u64) -> Self {
        let crystals = if catch_reward == 0 {
            0
        } else {
            score / catch_reward
        };
        Self {
            coins_earned: score,
            crystals_collected: crystals as u32,
        }
    }
}

/// Outcome of merging one run into a wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settlement {
    /// Coins the run itself earned, before any multiplier
    pub base_coins: u64,
    /// Coins actually credited (base x ship multiplier, floored)
    pub coins_earned: u64,
    /// Balance after the credit
    pub total_coins: u64,
    /// True if this run set a new high score
    pub new_high_score: bool,
}

/// Durable coin balance and high score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub coins: u64,
    /// Lifetime earnings (never decreases; spending only reduces `coins`)
    pub total_earned: u64,
    pub high_score: u64,
}

impl Wallet {
    /// Fresh wallet with the welcome bonus applied
    pub fn with_welcome_bonus() -> Self {
        Self {
            coins: WELCOME_BONUS,
            total_earned: WELCOME_BONUS,
            high_score: 0,
        }
    }

    /// Merge a run result, applying the active ship's coin multiplier
    pub fn settle(&mut self, result: &RunResult, multiplier: f32) -> Settlement {
        let credited = (result.coins_earned as f32 * multiplier) as u64;
        self.coins += credited;
        self.total_earned += credited;

        let new_high_score = result.coins_earned > self.high_score;
        if new_high_score {
            self.high_score = result.coins_earned;
        }

        Settlement {
            base_coins: result.coins_earned,
            coins_earned: credited,
            total_coins: self.coins,
            new_high_score,
        }
    }

    /// Debit coins; false (and no change) if the balance is short
    pub fn spend(&mut self, cost: u64) -> bool {
        if self.coins < cost {
            return false;
        }
        self.coins -= cost;
        true
    }

    pub fn credit_referral_inviter(&mut self) {
        self.coins += REFERRAL_BONUS_INVITER;
        self.total_earned += REFERRAL_BONUS_INVITER;
    }

    pub fn credit_referral_invited(&mut self) {
        self.coins += REFERRAL_BONUS_INVITED;
        self.total_earned += REFERRAL_BONUS_INVITED;
    }

    /// Current balance expressed in USDT
    pub fn usdt_value(&self) -> f32 {
        self.coins as f32 / COINS_PER_USDT as f32
    }

    pub fn can_withdraw(&self) -> bool {
        self.coins >= MIN_WITHDRAW_COINS
    }

    /// Coins still needed before withdrawal unlocks (0 once eligible)
    pub fn coins_until_withdraw(&self) -> u64 {
        MIN_WITHDRAW_COINS.saturating_sub(self.coins)
    }
}

/// Failure reported by a run sink
///
/// The local ledger never surfaces one; remote implementations map network
/// and protocol failures here. Either way the host decides whether to retry
/// or fall back to local accounting - run state is already final by then.
#[derive(Debug)]
pub enum EconomyError {
    Store(StoreError),
    Backend(String),
}

impl fmt::Display for EconomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EconomyError::Store(e) => write!(f, "profile store error: {e}"),
            EconomyError::Backend(msg) => write!(f, "backend error: {msg}"),
        }
    }
}

impl std::error::Error for EconomyError {}

impl From<StoreError> for EconomyError {
    fn from(e: StoreError) -> Self {
        EconomyError::Store(e)
    }
}

/// Where finished runs get reported
pub trait RunSink {
    fn submit(&mut self, result: &RunResult) -> Result<Settlement, EconomyError>;
}

/// Local-only economy: a profile on disk, no backend
pub struct LocalLedger {
    pub profile: Profile,
    path: PathBuf,
}

impl LocalLedger {
    /// Open the ledger at `path`, falling back to a fresh profile if the
    /// save is missing or unreadable
    pub fn open(path: PathBuf) -> Self {
        let profile = persistence::load(&path);
        Self { profile, path }
    }

    pub fn wallet(&self) -> &Wallet {
        &self.profile.wallet
    }
}

impl RunSink for LocalLedger {
    /// Settle into the in-memory wallet, then persist. A failed save is
    /// logged and degrades to in-memory accounting rather than erroring,
    /// so a submit never double-credits on retry.
    fn submit(&mut self, result: &RunResult) -> Result<Settlement, EconomyError> {
        let multiplier = self.profile.coin_multiplier();
        let settlement = self.profile.wallet.settle(result, multiplier);
        if let Err(e) = persistence::save(&self.path, &self.profile) {
            log::warn!("profile save failed, continuing in-memory: {e}");
        }
        Ok(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_credits_and_tracks_high_score() {
        let mut wallet = Wallet::with_welcome_bonus();
        let result = RunResult::from_score(250, 10);
        assert_eq!(result.crystals_collected, 25);

        let s = wallet.settle(&result, 1.0);
        assert_eq!(s.base_coins, 250);
        assert_eq!(s.coins_earned, 250);
        assert_eq!(s.total_coins, WELCOME_BONUS + 250);
        assert!(s.new_high_score);
        assert_eq!(wallet.high_score, 250);

        // Lower run: credited but not a new high score
        let s = wallet.settle(&RunResult::from_score(100, 10), 1.0);
        assert!(!s.new_high_score);
        assert_eq!(wallet.high_score, 250);
    }

    #[test]
    fn test_settle_applies_ship_multiplier() {
        let mut wallet = Wallet::default();
        let s = wallet.settle(&RunResult::from_score(100, 10), 1.5);
        assert_eq!(s.coins_earned, 150);
        assert_eq!(s.base_coins, 100);
        // High score tracks the raw run score, not the multiplied credit
        assert_eq!(wallet.high_score, 100);
    }

    #[test]
    fn test_spend_rejects_short_balance() {
        let mut wallet = Wallet::with_welcome_bonus();
        assert!(!wallet.spend(500));
        assert_eq!(wallet.coins, WELCOME_BONUS);
        assert!(wallet.spend(100));
        assert_eq!(wallet.coins, 0);
        // Lifetime earnings unaffected by spending
        assert_eq!(wallet.total_earned, WELCOME_BONUS);
    }

    #[test]
    fn test_withdrawal_math() {
        let mut wallet = Wallet::default();
        assert!(!wallet.can_withdraw());
        assert_eq!(wallet.coins_until_withdraw(), MIN_WITHDRAW_COINS);

        wallet.settle(&RunResult::from_score(12_500, 10), 1.0);
        assert!(wallet.can_withdraw());
        assert_eq!(wallet.coins_until_withdraw(), 0);
        assert_eq!(wallet.usdt_value(), 12.5);
    }

    #[test]
    fn test_referral_bonuses() {
        let mut inviter = Wallet::with_welcome_bonus();
        let mut invited = Wallet::with_welcome_bonus();
        inviter.credit_referral_inviter();
        invited.credit_referral_invited();
        assert_eq!(inviter.coins, WELCOME_BONUS + REFERRAL_BONUS_INVITER);
        assert_eq!(invited.coins, WELCOME_BONUS + REFERRAL_BONUS_INVITED);
    }
}
