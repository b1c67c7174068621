//! Level definitions
//!
//! JSON-shaped configuration consumed by [`Match3Game::initialize`](crate::Match3Game::initialize).
//! Field names follow the content files (camelCase):
//!
//! ```json
//! {
//!   "id": "level_001",
//!   "type": "Normal",
//!   "board": { "width": 9, "height": 9, "colors": ["Red", "Blue", "Green"],
//!              "spawnWeights": { "Red": 2 } },
//!   "moves": 20,
//!   "goals": [ { "kind": "CollectColor", "color": "Red", "count": 15 } ],
//!   "layout": { "cells": ["4,4,Stone,2", "0,0,Ice"] },
//!   "rewards": { "coins": 10 }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    Coord, GoalKind, LevelType, ObstacleKind, OverlayKind, TileColor, CRATE_HP, DEFAULT_ICE_HP,
    DEFAULT_STONE_HP,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    #[serde(default)]
    pub version: u32,
    pub id: String,
    #[serde(rename = "type", default)]
    pub level_type: LevelType,
    pub board: BoardConfig,
    pub moves: u32,
    #[serde(default)]
    pub goals: Vec<GoalConfig>,
    /// Present only for boss-attack levels.
    #[serde(default)]
    pub boss: Option<BossConfig>,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    /// Spawn colours in draw order.
    pub colors: Vec<TileColor>,
    #[serde(default)]
    pub spawn_weights: BTreeMap<TileColor, u32>,
}

impl BoardConfig {
    /// Number of different colours in `colors`.
    pub fn distinct_colors(&self) -> usize {
        let mut seen = [false; TileColor::COUNT];
        for color in &self.colors {
            seen[color.index()] = true;
        }
        seen.iter().filter(|&&s| s).count()
    }

    /// First colour listed more than once.
    pub fn first_duplicate_color(&self) -> Option<TileColor> {
        let mut seen = [false; TileColor::COUNT];
        self.colors
            .iter()
            .copied()
            .find(|color| std::mem::replace(&mut seen[color.index()], true))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalConfig {
    pub kind: GoalKind,
    /// Target for `CollectColor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<TileColor>,
    /// Target for `DestroyObstacles`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obstacle: Option<ObstacleKind>,
    pub count: u32,
}

impl GoalConfig {
    pub fn collect(color: TileColor, count: u32) -> Self {
        Self {
            kind: GoalKind::CollectColor,
            color: Some(color),
            obstacle: None,
            count,
        }
    }

    pub fn destroy(obstacle: ObstacleKind, count: u32) -> Self {
        Self {
            kind: GoalKind::DestroyObstacles,
            color: None,
            obstacle: Some(obstacle),
            count,
        }
    }

    pub fn clear_tiles(count: u32) -> Self {
        Self {
            kind: GoalKind::ClearTiles,
            color: None,
            obstacle: None,
            count,
        }
    }

    pub fn score(count: u32) -> Self {
        Self {
            kind: GoalKind::Score,
            color: None,
            obstacle: None,
            count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossConfig {
    pub hp: u32,
}

/// Sparse placement overrides, one `"x,y,Kind[,param]"` string per cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default)]
    pub coins: u32,
}

impl LevelConfig {
    /// A normal level with uniform spawn weights and no goals, layout or reward.
    pub fn new(id: impl Into<String>, width: u32, height: u32, colors: &[TileColor], moves: u32) -> Self {
        Self {
            version: 1,
            id: id.into(),
            level_type: LevelType::Normal,
            board: BoardConfig {
                width,
                height,
                colors: colors.to_vec(),
                spawn_weights: BTreeMap::new(),
            },
            moves,
            goals: Vec::new(),
            boss: None,
            layout: LayoutConfig::default(),
            rewards: RewardsConfig::default(),
        }
    }

    /// Turn into a boss-attack level.
    pub fn with_boss(mut self, hp: u32) -> Self {
        self.level_type = LevelType::BossAttack;
        self.boss = Some(BossConfig { hp });
        self
    }

    pub fn with_goal(mut self, goal: GoalConfig) -> Self {
        self.goals.push(goal);
        self
    }

    pub fn with_layout<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.layout.cells.extend(cells.into_iter().map(Into::into));
        self
    }

    pub fn with_reward(mut self, coins: u32) -> Self {
        self.rewards.coins = coins;
        self
    }

    pub fn with_spawn_weight(mut self, color: TileColor, weight: u32) -> Self {
        self.board.spawn_weights.insert(color, weight);
        self
    }

    pub fn is_boss(&self) -> bool {
        self.level_type == LevelType::BossAttack
    }
}

/// What a layout entry places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Obstacle { kind: ObstacleKind, hp: u32 },
    Overlay { kind: OverlayKind, hp: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    pub pos: Coord,
    pub placement: Placement,
}

impl LayoutEntry {
    /// Parse `"x,y,Kind[,param]"`
    ///
    /// - `Crate`: 1 hp, param ignored
    /// - `Stone`: hp = param (default 3)
    /// - `Ice`: overlay hp = param (default 1)
    ///
    /// Returns None for short entries, bad coordinates, unknown kinds and
    /// zero hit points. Bounds are not checked here.
    ///
    /// ```
    /// use match3_core::level::{LayoutEntry, Placement};
    /// use match3_core::types::{Coord, ObstacleKind};
    ///
    /// let e = LayoutEntry::parse("4, 2, Stone, 5").unwrap();
    /// assert_eq!(e.pos, Coord::new(4, 2));
    /// assert_eq!(e.placement, Placement::Obstacle { kind: ObstacleKind::Stone, hp: 5 });
    /// assert!(LayoutEntry::parse("4,2").is_none());
    /// ```
    pub fn parse(entry: &str) -> Option<Self> {
        let mut parts = entry.split(',').map(str::trim);
        let x: i32 = parts.next()?.parse().ok()?;
        let y: i32 = parts.next()?.parse().ok()?;
        let kind = parts.next()?;
        let param = parts.next().filter(|p| !p.is_empty());

        let hp_or = |default: u32| -> Option<u32> {
            match param {
                Some(p) => p.parse().ok(),
                None => Some(default),
            }
        };

        let placement = match kind {
            "Crate" => Placement::Obstacle {
                kind: ObstacleKind::Crate,
                hp: CRATE_HP,
            },
            "Stone" => Placement::Obstacle {
                kind: ObstacleKind::Stone,
                hp: hp_or(DEFAULT_STONE_HP)?,
            },
            "Ice" => Placement::Overlay {
                kind: OverlayKind::Ice,
                hp: hp_or(DEFAULT_ICE_HP)?,
            },
            _ => return None,
        };

        let hp = match placement {
            Placement::Obstacle { hp, .. } | Placement::Overlay { hp, .. } => hp,
        };
        if hp == 0 {
            return None;
        }

        Some(Self {
            pos: Coord::new(x, y),
            placement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout_entries() {
        assert_eq!(
            LayoutEntry::parse("0,0,Crate,9").unwrap().placement,
            Placement::Obstacle {
                kind: ObstacleKind::Crate,
                hp: 1
            }
        );
        assert_eq!(
            LayoutEntry::parse("1,2,Stone").unwrap().placement,
            Placement::Obstacle {
                kind: ObstacleKind::Stone,
                hp: 3
            }
        );
        assert_eq!(
            LayoutEntry::parse("1,2,Ice,2").unwrap().placement,
            Placement::Overlay {
                kind: OverlayKind::Ice,
                hp: 2
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(LayoutEntry::parse("").is_none());
        assert!(LayoutEntry::parse("a,1,Crate").is_none());
        assert!(LayoutEntry::parse("1,1,Lava").is_none());
        assert!(LayoutEntry::parse("1,1,Stone,abc").is_none());
        assert!(LayoutEntry::parse("1,1,Stone,0").is_none());
        assert!(LayoutEntry::parse("1,1,Ice,-2").is_none());
    }

    #[test]
    fn test_level_json_roundtrip_fields() {
        let json = r#"{
            "id": "boss_01",
            "type": "BossAttack",
            "board": { "width": 9, "height": 9, "colors": ["Red", "Blue", "Green"],
                       "spawnWeights": { "Red": 3 } },
            "moves": 25,
            "goals": [ { "kind": "CollectColor", "color": "Blue", "count": 10 } ],
            "boss": { "hp": 120 },
            "layout": { "cells": ["1,1,Crate"] },
            "rewards": { "coins": 50 }
        }"#;
        let level: LevelConfig = serde_json::from_str(json).unwrap();
        assert!(level.is_boss());
        assert_eq!(level.boss, Some(BossConfig { hp: 120 }));
        assert_eq!(level.board.spawn_weights.get(&TileColor::Red), Some(&3));
        assert_eq!(level.goals[0], GoalConfig::collect(TileColor::Blue, 10));
        assert_eq!(level.rewards.coins, 50);
        assert_eq!(level.version, 0);
    }

    #[test]
    fn test_distinct_colors() {
        let level = LevelConfig::new(
            "l",
            5,
            5,
            &[TileColor::Red, TileColor::Blue, TileColor::Red, TileColor::Red],
            3,
        );
        assert_eq!(level.board.distinct_colors(), 2);
        assert_eq!(level.board.first_duplicate_color(), Some(TileColor::Red));

        let level = LevelConfig::new("l", 5, 5, &[TileColor::Green, TileColor::Blue], 3);
        assert_eq!(level.board.distinct_colors(), 2);
        assert_eq!(level.board.first_duplicate_color(), None);
    }

    #[test]
    fn test_minimal_level_defaults() {
        let json = r#"{ "id": "l1", "board": { "width": 5, "height": 5, "colors": ["Red"] }, "moves": 3 }"#;
        let level: LevelConfig = serde_json::from_str(json).unwrap();
        assert_eq!(level.level_type, LevelType::Normal);
        assert!(level.goals.is_empty());
        assert!(level.layout.cells.is_empty());
        assert_eq!(level.rewards.coins, 0);
    }
}
