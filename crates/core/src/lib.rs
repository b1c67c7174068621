//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains every match-3 rule: board generation, match
//! detection, special tiles, cascades, goals and boss damage. It performs no
//! I/O, making it:
//!
//! - **Deterministic**: the same level, seed and action sequence always
//!   produce the same events and the same end result (replay verification)
//! - **Testable**: boards can be built from text rows and driven directly
//! - **Portable**: usable from a presentation layer, a CLI or a test harness
//!
//! # Module Structure
//!
//! - [`rng`]: xorshift64 generator with weighted selection
//! - [`cell`]: tile/obstacle/overlay state of a single slot
//! - [`grid`]: `width x height` playfield with bounds and neighbour queries
//! - [`matcher`]: run detection and L/T merging
//! - [`goals`]: per-attempt goal counters
//! - [`spawn`]: weighted colour table for new tiles
//! - [`level`] / [`tuning`]: serde configuration
//! - [`validate`]: strict pre-flight checks for content files
//! - [`engine`]: the [`Match3Game`] state machine
//! - [`snapshot`]: owned copies and board hashes
//!
//! # Rules
//!
//! - A swap is accepted when it creates a match or involves a special tile
//! - 4 in a line makes a Rocket, 5+ a Disco, an L/T shape a Bomb
//! - Clearing a tile hits the obstacles and ice next to it
//! - Tiles fall, new ones spawn and matches resolve until the board is stable
//! - Boss levels are won at 0 HP, other levels when every goal is met
//!
//! # Example
//!
//! ```
//! use match3_core::{find_matches, BossTuning, LevelConfig, Match3Game};
//! use match3_core::types::{GameState, TileColor};
//!
//! let colors = [TileColor::Red, TileColor::Green, TileColor::Blue];
//! let level = LevelConfig::new("demo", 8, 8, &colors, 15);
//!
//! let game = Match3Game::start(&level, 12345, BossTuning::default()).unwrap();
//! assert_eq!(game.state(), GameState::Running);
//! assert_eq!(game.remaining_moves(), 15);
//! assert!(find_matches(game.grid()).is_empty());
//! ```

pub mod cell;
pub mod engine;
pub mod error;
pub mod goals;
pub mod grid;
pub mod level;
pub mod matcher;
pub mod rng;
pub mod snapshot;
pub mod spawn;
pub mod tuning;
pub mod validate;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use cell::{Cell, Obstacle, Overlay, Special, Tile};
pub use engine::Match3Game;
pub use error::InitError;
pub use goals::GoalTracker;
pub use grid::Grid;
pub use level::{BoardConfig, BossConfig, GoalConfig, LayoutConfig, LevelConfig, RewardsConfig};
pub use matcher::{find_matches, has_matches, MatchGroup};
pub use rng::SeededRandom;
pub use snapshot::{fnv1a64, GameSnapshot};
pub use spawn::SpawnTable;
pub use tuning::{BossTuning, RemoteTuning};
pub use validate::{validate_boss_tuning, validate_level, validate_remote_tuning, ValidationError};
