//! Remote tuning - boss damage numbers and default spawn weights
//!
//! # Environment Variables
//!
//! [`BossTuning::from_env`] reads:
//!
//! - `MATCH3_DAMAGE_PER_TILE`: damage per cleared tile (default: 1)
//! - `MATCH3_ROCKET_BONUS`: flat rocket bonus (default: 6)
//! - `MATCH3_BOMB_BONUS`: flat bomb bonus (default: 10)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    TileColor, DEFAULT_BOMB_DAMAGE_BONUS, DEFAULT_DAMAGE_PER_TILE, DEFAULT_ROCKET_DAMAGE_BONUS,
};

/// Boss damage formula inputs
///
/// - tile cleared by a match or hammer: `damage_per_tile`
/// - rocket: `damage_per_tile * max(width, height) + rocket_damage_bonus`
/// - bomb: `damage_per_tile * 9 + bomb_damage_bonus`
/// - disco: `damage_per_tile * tiles_cleared`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BossTuning {
    pub damage_per_tile: u32,
    pub rocket_damage_bonus: u32,
    pub bomb_damage_bonus: u32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            damage_per_tile: DEFAULT_DAMAGE_PER_TILE,
            rocket_damage_bonus: DEFAULT_ROCKET_DAMAGE_BONUS,
            bomb_damage_bonus: DEFAULT_BOMB_DAMAGE_BONUS,
        }
    }
}

impl BossTuning {
    pub fn from_env() -> Self {
        use std::env;

        let read = |key: &str, default: u32| {
            env::var(key)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            damage_per_tile: read("MATCH3_DAMAGE_PER_TILE", DEFAULT_DAMAGE_PER_TILE),
            rocket_damage_bonus: read("MATCH3_ROCKET_BONUS", DEFAULT_ROCKET_DAMAGE_BONUS),
            bomb_damage_bonus: read("MATCH3_BOMB_BONUS", DEFAULT_BOMB_DAMAGE_BONUS),
        }
    }

    pub fn with_damage_per_tile(mut self, damage: u32) -> Self {
        self.damage_per_tile = damage;
        self
    }
}

/// Remotely delivered tuning document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteTuning {
    pub version: u32,
    /// Fallback weights for colours a level leaves unweighted.
    pub spawn_weights_default: BTreeMap<TileColor, u32>,
    pub boss: BossTuning,
}
