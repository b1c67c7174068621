//! Match-3 simulation (workspace facade crate).
//!
//! This package exposes `match3_sim::{core, replay, types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use match3_core as core;
pub use match3_replay as replay;
pub use match3_types as types;
