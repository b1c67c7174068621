//! Strict pre-flight validation of content files
//!
//! The engine only refuses levels it cannot build a board from. Content
//! pipelines run these checks first and fail on the first violation.

use thiserror::Error;

use crate::level::LevelConfig;
use crate::tuning::{BossTuning, RemoteTuning};
use crate::types::{
    GoalKind, TileColor, MAX_BOARD_DIM, MAX_MOVES, MIN_BOARD_DIM, MIN_COLORS, MIN_MOVES,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("level id mismatch: file says '{expected}', config.id='{actual}'")]
    IdMismatch { expected: String, actual: String },

    #[error("board.width must be [5..12], got {0}")]
    WidthOutOfRange(u32),

    #[error("board.height must be [5..12], got {0}")]
    HeightOutOfRange(u32),

    #[error("level.moves must be [1..60], got {0}")]
    MovesOutOfRange(u32),

    #[error("board.colors must have >= 3 distinct colors, got {0}")]
    TooFewColors(usize),

    #[error("board.colors lists {0:?} more than once")]
    DuplicateColor(TileColor),

    #[error("goal #{index}: count must be > 0")]
    ZeroGoalCount { index: usize },

    #[error("goal #{index}: {kind:?} goal has no target")]
    GoalMissingTarget { index: usize, kind: GoalKind },

    #[error("boss-attack level has no boss block")]
    MissingBoss,

    #[error("spawnWeightsDefault is empty")]
    EmptySpawnWeights,

    #[error("spawnWeightsDefault sum is 0")]
    ZeroSpawnWeightSum,

    #[error("boss damage overflows: damagePerTile={damage_per_tile}")]
    BossDamageOverflow { damage_per_tile: u32 },
}

/// Validate a level definition. `expected_id` is the id implied by the file
/// name, when known.
pub fn validate_level(level: &LevelConfig, expected_id: Option<&str>) -> Result<(), ValidationError> {
    if let Some(expected) = expected_id {
        if level.id != expected {
            return Err(ValidationError::IdMismatch {
                expected: expected.to_string(),
                actual: level.id.clone(),
            });
        }
    }

    let dims = MIN_BOARD_DIM..=MAX_BOARD_DIM;
    if !dims.contains(&level.board.width) {
        return Err(ValidationError::WidthOutOfRange(level.board.width));
    }
    if !dims.contains(&level.board.height) {
        return Err(ValidationError::HeightOutOfRange(level.board.height));
    }
    if !(MIN_MOVES..=MAX_MOVES).contains(&level.moves) {
        return Err(ValidationError::MovesOutOfRange(level.moves));
    }
    if let Some(color) = level.board.first_duplicate_color() {
        return Err(ValidationError::DuplicateColor(color));
    }
    let distinct = level.board.distinct_colors();
    if distinct < MIN_COLORS {
        return Err(ValidationError::TooFewColors(distinct));
    }

    for (index, goal) in level.goals.iter().enumerate() {
        if goal.count == 0 {
            return Err(ValidationError::ZeroGoalCount { index });
        }
        let missing = match goal.kind {
            GoalKind::CollectColor => goal.color.is_none(),
            GoalKind::DestroyObstacles => goal.obstacle.is_none(),
            GoalKind::ClearTiles | GoalKind::Score => false,
        };
        if missing {
            return Err(ValidationError::GoalMissingTarget {
                index,
                kind: goal.kind,
            });
        }
    }

    if level.is_boss() && level.boss.is_none() {
        return Err(ValidationError::MissingBoss);
    }

    // Layouts are sparse overrides; a full layout that disagrees with the
    // board size is accepted as-is.
    Ok(())
}

pub fn validate_remote_tuning(tuning: &RemoteTuning) -> Result<(), ValidationError> {
    validate_boss_tuning(&tuning.boss)?;

    if tuning.spawn_weights_default.is_empty() {
        return Err(ValidationError::EmptySpawnWeights);
    }
    let sum: u64 = tuning
        .spawn_weights_default
        .values()
        .map(|&w| w as u64)
        .sum();
    if sum == 0 {
        return Err(ValidationError::ZeroSpawnWeightSum);
    }
    Ok(())
}

/// Every activation formula must fit in `u32` on the largest board.
pub fn validate_boss_tuning(tuning: &BossTuning) -> Result<(), ValidationError> {
    let dpt = tuning.damage_per_tile;
    let rocket = dpt
        .checked_mul(MAX_BOARD_DIM)
        .and_then(|d| d.checked_add(tuning.rocket_damage_bonus));
    let bomb = dpt
        .checked_mul(9)
        .and_then(|d| d.checked_add(tuning.bomb_damage_bonus));
    let disco = dpt.checked_mul(MAX_BOARD_DIM * MAX_BOARD_DIM);

    if rocket.is_none() || bomb.is_none() || disco.is_none() {
        return Err(ValidationError::BossDamageOverflow { damage_per_tile: dpt });
    }
    Ok(())
}
