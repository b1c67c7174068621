//! Replay tooling for the match-3 engine
//!
//! A replay is the level id, the seed and the ordered list of player
//! actions of one attempt. Because the engine is deterministic, re-running
//! those actions against a freshly initialized engine must reproduce every
//! accept/reject decision and the final [`EndResult`](match3_core::types::EndResult).
//!
//! - [`record`]: JSON replay documents and the [`Recorder`]
//! - [`runner`]: [`run_replay`] verification
//! - [`seed`]: [`derive_seed`] for per-attempt seeds
//! - [`autoplay`]: a greedy player for producing recordings

pub mod autoplay;
pub mod record;
pub mod runner;
pub mod seed;

pub use autoplay::{autoplay, AutoplayReport};
pub use record::{
    Action, ExpectedResult, Recorder, ReplayAction, ReplayExpected, ReplayRecord,
    REPLAY_FORMAT_VERSION,
};
pub use runner::{run_replay, ReplayError, ReplayOutcome};
pub use seed::derive_seed;
