//! Replay verification
//!
//! A replay passes when every recorded action is accepted by a freshly
//! initialized engine and the final state matches the record's
//! expectations.

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use match3_core::types::{BoosterType, Coord, EndResult, GameState, SwapResult};
use match3_core::{InitError, LevelConfig, Match3Game, RemoteTuning};

use crate::record::{Action, ExpectedResult, ReplayRecord};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid replay JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("engine initialization failed: {0}")]
    Init(#[from] InitError),

    #[error("replay is for level '{expected}', got level '{actual}'")]
    LevelMismatch { expected: String, actual: String },

    #[error("swap rejected at action t={t}: {a}->{b}")]
    SwapRejected { t: u32, a: Coord, b: Coord },

    #[error("hammer rejected at action t={t}: cell={cell}")]
    HammerRejected { t: u32, cell: Coord },

    #[error("expected result={expected:?}, got={actual:?}")]
    ResultMismatch {
        expected: ExpectedResult,
        actual: ExpectedResult,
    },

    #[error("expected movesUsed={expected}, got={actual}")]
    MovesMismatch { expected: u32, actual: u32 },

    #[error("expected bossHpRemaining={expected}, got={actual:?}")]
    BossHpMismatch { expected: u32, actual: Option<u32> },

    #[error("expected coinsGained={expected}, got={actual}")]
    CoinsMismatch { expected: u32, actual: u32 },
}

/// Final state of a verified replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutcome {
    pub state: GameState,
    /// Absent if the engine is still running.
    pub end_result: Option<EndResult>,
    pub actions_applied: usize,
    pub remaining_moves: u32,
    pub board_hash: u64,
}

/// Re-run `record` against `level` and check its expectations.
pub fn run_replay(
    level: &LevelConfig,
    tuning: &RemoteTuning,
    record: &ReplayRecord,
) -> Result<ReplayOutcome, ReplayError> {
    if record.level_id != level.id {
        return Err(ReplayError::LevelMismatch {
            expected: record.level_id.clone(),
            actual: level.id.clone(),
        });
    }

    let mut game = Match3Game::from_remote(tuning);
    game.initialize(level, record.seed)?;
    debug!(
        "replaying {} action(s) on level {} (seed {})",
        record.actions.len(),
        level.id,
        record.seed
    );

    for step in &record.actions {
        apply_action(&mut game, step.t, step.action)?;
        game.consume_events();
    }

    let outcome = ReplayOutcome {
        state: game.state(),
        end_result: game.end_result(),
        actions_applied: record.actions.len(),
        remaining_moves: game.remaining_moves(),
        board_hash: game.snapshot().board_hash(),
    };

    if let Some(expected) = &record.expected {
        if let Err(err) = check_expectations(expected, outcome.end_result) {
            warn!("replay for level {} diverged: {err}", level.id);
            return Err(err);
        }
    }
    Ok(outcome)
}

fn apply_action(game: &mut Match3Game, t: u32, action: Action) -> Result<(), ReplayError> {
    match action {
        Action::Swap { a, b } => {
            if game.try_swap(a, b) != SwapResult::Accepted {
                return Err(ReplayError::SwapRejected { t, a, b });
            }
        }
        Action::Hammer { cell } => {
            if !game.use_booster(BoosterType::Hammer, Some(cell)) {
                return Err(ReplayError::HammerRejected { t, cell });
            }
        }
    }
    Ok(())
}

fn check_expectations(
    expected: &crate::record::ReplayExpected,
    end: Option<EndResult>,
) -> Result<(), ReplayError> {
    let actual = end.map(|e| e.result);
    if !expected.result.matches(actual) {
        return Err(ReplayError::ResultMismatch {
            expected: expected.result,
            actual: ExpectedResult::from(actual),
        });
    }

    // The numeric checks only apply to finished attempts.
    let Some(end) = end else {
        return Ok(());
    };

    if let Some(moves) = expected.moves_used {
        if moves != end.moves_used {
            return Err(ReplayError::MovesMismatch {
                expected: moves,
                actual: end.moves_used,
            });
        }
    }
    if let Some(hp) = expected.boss_hp_remaining {
        if Some(hp) != end.boss_hp_remaining {
            return Err(ReplayError::BossHpMismatch {
                expected: hp,
                actual: end.boss_hp_remaining,
            });
        }
    }
    if let Some(coins) = expected.coins_gained {
        if coins != end.coins_gained {
            return Err(ReplayError::CoinsMismatch {
                expected: coins,
                actual: end.coins_gained,
            });
        }
    }
    Ok(())
}
