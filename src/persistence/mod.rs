//! Profile save/load
//!
//! Versioned JSON envelope written with a temp-file rename so a crash mid-
//! write never truncates the live save. Any load failure is recoverable:
//! the caller gets a fresh default profile and keeps playing.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::shop;
use crate::wallet::Wallet;

/// Bump when the profile schema changes shape
pub const SAVE_VERSION: u32 = 1;

/// Everything remembered across restarts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub wallet: Wallet,
    /// Shop ship ids owned by this player (the basic ship is implicit)
    #[serde(default)]
    pub owned_ships: Vec<String>,
    /// Currently selected ship; None means the basic ship
    #[serde(default)]
    pub selected_ship: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            wallet: Wallet::with_welcome_bonus(),
            owned_ships: Vec::new(),
            selected_ship: None,
        }
    }
}

impl Profile {
    /// Coin multiplier of the selected ship (x1.0 for the basic ship)
    pub fn coin_multiplier(&self) -> f32 {
        self.selected_ship
            .as_deref()
            .map(shop::ship_multiplier)
            .unwrap_or(1.0)
    }
}

/// On-disk envelope around the profile
#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    version: u32,
    profile: Profile,
}

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
    /// Save written by an unknown (newer) schema
    Version(u32),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "io error: {e}"),
            StoreError::Json(e) => write!(f, "malformed save: {e}"),
            StoreError::Version(v) => write!(f, "unsupported save version {v}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

fn read_save(path: &Path) -> Result<Profile, StoreError> {
    let json = fs::read_to_string(path)?;
    let save: SaveFile = serde_json::from_str(&json)?;
    if save.version != SAVE_VERSION {
        return Err(StoreError::Version(save.version));
    }
    Ok(save.profile)
}

/// Load the profile at `path`; any failure falls back to defaults
pub fn load(path: &Path) -> Profile {
    match read_save(path) {
        Ok(profile) => {
            log::info!("loaded profile from {}", path.display());
            profile
        }
        Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("no profile at {}, starting fresh", path.display());
            Profile::default()
        }
        Err(e) => {
            log::warn!("unreadable profile at {}: {e}, starting fresh", path.display());
            Profile::default()
        }
    }
}

/// Persist the profile: write a sibling temp file, then rename over the save
pub fn save(path: &Path, profile: &Profile) -> Result<(), StoreError> {
    let save = SaveFile {
        version: SAVE_VERSION,
        profile: profile.clone(),
    };
    let json = serde_json::to_string_pretty(&save)?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    log::info!("profile saved to {}", path.display());
    Ok(())
}
