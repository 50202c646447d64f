//! Shop catalog and coin purchases
//!
//! Ships bought here carry a coin multiplier that feeds run settlement.
//! USDT-priced items are listed for display only; payment submission and
//! verification live outside this crate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::persistence::Profile;

/// Ship id every profile starts with (x1.0, not listed in the shop)
pub const BASIC_SHIP: &str = "basic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Ship,
    Boost,
    Coins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// A purchasable item
///
/// Exactly one of `price_coins` / `price_usdt` is set per item.
#[derive(Debug, Clone, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ItemKind,
    pub price_coins: Option<u64>,
    pub price_usdt: Option<f32>,
    /// Multiplier applied to run earnings while active (ships and boosts)
    pub coin_multiplier: Option<f32>,
    pub rarity: Rarity,
    pub image: &'static str,
}

/// The full catalog, in display order
pub fn catalog() -> &'static [ShopItem] {
    use ItemKind::*;
    use Rarity::*;
    const ITEMS: &[ShopItem] = &[
        // Ships purchasable with coins
        ShopItem {
            id: "ship_silver",
            name: "Silver Cruiser",
            description: "Collect 50% more coins",
            kind: Ship,
            price_coins: Some(500),
            price_usdt: None,
            coin_multiplier: Some(1.5),
            rarity: Common,
            image: "🚀",
        },
        ShopItem {
            id: "ship_gold",
            name: "Gold Voyager",
            description: "Collect 2x coins",
            kind: Ship,
            price_coins: Some(2_000),
            price_usdt: None,
            coin_multiplier: Some(2.0),
            rarity: Rare,
            image: "✨",
        },
        // Premium ships (USDT, display only here)
        ShopItem {
            id: "ship_diamond",
            name: "Diamond Striker",
            description: "3x coins + speed bonus",
            kind: Ship,
            price_coins: None,
            price_usdt: Some(5.0),
            coin_multiplier: Some(3.0),
            rarity: Epic,
            image: "💎",
        },
        ShopItem {
            id: "ship_cosmic",
            name: "Cosmic Destroyer",
            description: "5x coins + max speed",
            kind: Ship,
            price_coins: None,
            price_usdt: Some(15.0),
            coin_multiplier: Some(5.0),
            rarity: Legendary,
            image: "🌟",
        },
        ShopItem {
            id: "ship_phoenix",
            name: "Phoenix Inferno",
            description: "10x coins + shield",
            kind: Ship,
            price_coins: None,
            price_usdt: Some(50.0),
            coin_multiplier: Some(10.0),
            rarity: Legendary,
            image: "🔥",
        },
        // Boosts (USDT, display only here)
        ShopItem {
            id: "boost_2x_1h",
            name: "2x Boost (1 hour)",
            description: "2x coins for one hour",
            kind: Boost,
            price_coins: None,
            price_usdt: Some(1.0),
            coin_multiplier: Some(2.0),
            rarity: Rare,
            image: "⚡",
        },
        ShopItem {
            id: "boost_5x_1h",
            name: "5x Boost (1 hour)",
            description: "5x coins for one hour",
            kind: Boost,
            price_coins: None,
            price_usdt: Some(3.0),
            coin_multiplier: Some(5.0),
            rarity: Epic,
            image: "💫",
        },
        ShopItem {
            id: "boost_10x_30m",
            name: "10x Mega Boost (30 min)",
            description: "10x coins for 30 minutes",
            kind: Boost,
            price_coins: None,
            price_usdt: Some(5.0),
            coin_multiplier: Some(10.0),
            rarity: Legendary,
            image: "🌈",
        },
        // Coin packs (USDT, display only here)
        ShopItem {
            id: "coins_1000",
            name: "1000 Coin Pack",
            description: "1000 game coins",
            kind: Coins,
            price_coins: None,
            price_usdt: Some(2.0),
            coin_multiplier: None,
            rarity: Common,
            image: "💰",
        },
        ShopItem {
            id: "coins_5000",
            name: "5000 Coin Pack",
            description: "5000 game coins + 10% bonus",
            kind: Coins,
            price_coins: None,
            price_usdt: Some(8.0),
            coin_multiplier: None,
            rarity: Rare,
            image: "💰",
        },
        ShopItem {
            id: "coins_15000",
            name: "15000 Coin Pack",
            description: "15000 game coins + 25% bonus",
            kind: Coins,
            price_coins: None,
            price_usdt: Some(20.0),
            coin_multiplier: None,
            rarity: Epic,
            image: "💰",
        },
    ];
    ITEMS
}

/// Look up a catalog item by id
pub fn find_item(id: &str) -> Option<&'static ShopItem> {
    catalog().iter().find(|item| item.id == id)
}

/// Coin multiplier for a ship id (x1.0 for the basic ship or unknown ids)
pub fn ship_multiplier(ship_id: &str) -> f32 {
    find_item(ship_id)
        .and_then(|item| item.coin_multiplier)
        .unwrap_or(1.0)
}

#[derive(Debug, PartialEq, Eq)]
pub enum ShopError {
    UnknownItem(String),
    /// Item is priced in USDT; coin purchase does not apply
    NotCoinPriced(String),
    /// Coin-priced but grants nothing the profile can hold
    UnsupportedPurchase(String),
    AlreadyOwned(String),
    InsufficientCoins {
        needed: u64,
        have: u64,
    },
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopError::UnknownItem(id) => write!(f, "unknown shop item: {id}"),
            ShopError::NotCoinPriced(id) => write!(f, "item {id} is not purchasable with coins"),
            ShopError::UnsupportedPurchase(id) => {
                write!(f, "item {id} cannot be granted to a profile")
            }
            ShopError::AlreadyOwned(id) => write!(f, "item {id} already owned"),
            ShopError::InsufficientCoins { needed, have } => {
                write!(f, "insufficient coins: need {needed}, have {have}")
            }
        }
    }
}

impl std::error::Error for ShopError {}

/// Buy a coin-priced item into the profile
///
/// Ships are recorded as owned and become the selected ship immediately,
/// matching the original shop flow.
pub fn buy_with_coins(profile: &mut Profile, item_id: &str) -> Result<(), ShopError> {
    let item = find_item(item_id).ok_or_else(|| ShopError::UnknownItem(item_id.to_string()))?;
    purchase(profile, item)
}

fn purchase(profile: &mut Profile, item: &ShopItem) -> Result<(), ShopError> {
    let cost = item
        .price_coins
        .ok_or_else(|| ShopError::NotCoinPriced(item.id.to_string()))?;

    // Only ships can be recorded on a profile; never debit for anything else
    if item.kind != ItemKind::Ship {
        return Err(ShopError::UnsupportedPurchase(item.id.to_string()));
    }
    if profile.owned_ships.iter().any(|s| s == item.id) {
        return Err(ShopError::AlreadyOwned(item.id.to_string()));
    }
    if !profile.wallet.spend(cost) {
        return Err(ShopError::InsufficientCoins {
            needed: cost,
            have: profile.wallet.coins,
        });
    }

    profile.owned_ships.push(item.id.to_string());
    profile.selected_ship = Some(item.id.to_string());
    Ok(())
}
