//! Construction errors
//!
//! Gameplay rejections are plain return values; only a level the engine
//! cannot build a board from fails here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("level has no spawn colours")]
    EmptyColors,

    #[error("level needs at least 2 distinct spawn colours (got {distinct})")]
    TooFewColors { distinct: usize },

    #[error("board dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("boss-attack level has no boss configuration")]
    MissingBoss,

    #[error("engine already initialized")]
    AlreadyInitialized,
}
