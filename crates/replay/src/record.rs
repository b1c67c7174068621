//! Replay records and the recorder that produces them
//!
//! On disk a replay is a JSON document:
//!
//! ```json
//! {
//!   "version": 1,
//!   "levelId": "level_001",
//!   "seed": 42,
//!   "attemptIndex": 0,
//!   "actions": [
//!     { "t": 0, "type": "swap", "a": [3, 4], "b": [4, 4] },
//!     { "t": 1, "type": "hammer", "cell": [0, 0] }
//!   ],
//!   "expected": { "result": "win", "movesUsed": 1 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use match3_core::types::{Coord, LevelResult};

use crate::runner::ReplayError;

pub const REPLAY_FORMAT_VERSION: u32 = 1;

/// A single player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Swap { a: Coord, b: Coord },
    Hammer { cell: Coord },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayAction {
    /// Index of the action within its record.
    pub t: u32,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedResult {
    Win,
    Lose,
    /// The engine must still be running after the last action.
    Incomplete,
}

impl ExpectedResult {
    pub fn matches(&self, actual: Option<LevelResult>) -> bool {
        matches!(
            (self, actual),
            (ExpectedResult::Win, Some(LevelResult::Win))
                | (ExpectedResult::Lose, Some(LevelResult::Lose))
                | (ExpectedResult::Incomplete, None)
        )
    }
}

impl From<Option<LevelResult>> for ExpectedResult {
    fn from(result: Option<LevelResult>) -> Self {
        match result {
            Some(LevelResult::Win) => ExpectedResult::Win,
            Some(LevelResult::Lose) => ExpectedResult::Lose,
            None => ExpectedResult::Incomplete,
        }
    }
}

/// Expectations checked after the last action. Absent fields are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayExpected {
    pub result: ExpectedResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves_used: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss_hp_remaining: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coins_gained: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    pub level_id: String,
    pub seed: u64,
    #[serde(default)]
    pub attempt_index: u32,
    #[serde(default)]
    pub actions: Vec<ReplayAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<ReplayExpected>,
}

fn default_version() -> u32 {
    REPLAY_FORMAT_VERSION
}

impl ReplayRecord {
    pub fn new(level_id: impl Into<String>, seed: u64, attempt_index: u32) -> Self {
        Self {
            version: REPLAY_FORMAT_VERSION,
            level_id: level_id.into(),
            seed,
            attempt_index,
            actions: Vec::new(),
            expected: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReplayError> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// Collects actions for one attempt at a time.
#[derive(Debug, Default)]
pub struct Recorder {
    current: Option<ReplayRecord>,
    last_completed: Option<ReplayRecord>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new recording, discarding any unfinished one.
    pub fn start(&mut self, level_id: impl Into<String>, seed: u64, attempt_index: u32) {
        self.current = Some(ReplayRecord::new(level_id, seed, attempt_index));
    }

    /// Append an action, numbering it. Ignored when not recording.
    pub fn record(&mut self, action: Action) {
        if let Some(record) = self.current.as_mut() {
            let t = record.actions.len() as u32;
            record.actions.push(ReplayAction { t, action });
        }
    }

    pub fn is_recording(&self) -> bool {
        self.current.is_some()
    }

    /// Finish the current recording.
    pub fn stop(&mut self) -> Option<ReplayRecord> {
        let record = self.current.take()?;
        self.last_completed = Some(record.clone());
        Some(record)
    }

    pub fn last_completed(&self) -> Option<&ReplayRecord> {
        self.last_completed.as_ref()
    }
}
