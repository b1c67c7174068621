//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the simulation.
//! All types are plain data with no behaviour beyond parsing and small helpers,
//! making them usable in any context (engine, replay tooling, presentation).
//!
//! # Coordinates
//!
//! Cells are addressed by signed `(x, y)` pairs:
//!
//! - **x**: column, `0` is the leftmost column
//! - **y**: row, `0` is the bottom row (gravity pulls toward lower `y`)
//!
//! Coordinates are signed so that callers can pass out-of-range input
//! (e.g. `(-1, 0)`) and have it rejected instead of wrapping.
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_DAMAGE_PER_TILE` | 1 | Boss damage per cleared tile |
//! | `DEFAULT_ROCKET_DAMAGE_BONUS` | 6 | Flat bonus added to rocket damage |
//! | `DEFAULT_BOMB_DAMAGE_BONUS` | 10 | Flat bonus added to bomb damage |
//! | `MAX_FILL_ATTEMPTS` | 20 | Bounded retries for a match-free starting board |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Coord, TileColor};
//!
//! let a = Coord::new(2, 3);
//! assert!(a.is_adjacent(Coord::new(2, 4)));
//! assert!(!a.is_adjacent(Coord::new(3, 4)));
//!
//! assert_eq!(TileColor::from_str("red"), Some(TileColor::Red));
//! assert_eq!(TileColor::Purple.index(), 4);
//! ```

use serde::{Deserialize, Serialize};

/// Smallest board edge accepted by the strict level validator.
pub const MIN_BOARD_DIM: u32 = 5;

/// Largest board edge accepted by the strict level validator.
pub const MAX_BOARD_DIM: u32 = 12;

/// Move budget range accepted by the strict level validator.
pub const MIN_MOVES: u32 = 1;
pub const MAX_MOVES: u32 = 60;

/// Minimum number of spawn colours for a playable level.
pub const MIN_COLORS: usize = 3;

/// Upper bound on full-board fill attempts during initialisation.
pub const MAX_FILL_ATTEMPTS: u32 = 20;

/// Shortest run that counts as a match.
pub const MIN_MATCH_LEN: usize = 3;

/// Boss damage per cleared tile.
pub const DEFAULT_DAMAGE_PER_TILE: u32 = 1;

/// Flat bonus added to a rocket's boss damage.
pub const DEFAULT_ROCKET_DAMAGE_BONUS: u32 = 6;

/// Flat bonus added to a bomb's boss damage.
pub const DEFAULT_BOMB_DAMAGE_BONUS: u32 = 10;

/// Hit points of a crate placed by a layout entry.
pub const CRATE_HP: u32 = 1;

/// Hit points of a stone when the layout entry omits them.
pub const DEFAULT_STONE_HP: u32 = 3;

/// Ice layers when the layout entry omits them.
pub const DEFAULT_ICE_HP: u32 = 1;

/// Spawn weight used for colours without a positive configured weight.
pub const DEFAULT_SPAWN_WEIGHT: u32 = 1;

/// A grid coordinate.
///
/// Serialised as a two-element array `[x, y]`, the format replay files use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance between two coordinates.
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonally adjacent (Manhattan distance exactly 1).
    ///
    /// ```
    /// use match3_types::Coord;
    ///
    /// assert!(Coord::new(0, 0).is_adjacent(Coord::new(1, 0)));
    /// assert!(!Coord::new(0, 0).is_adjacent(Coord::new(0, 0)));
    /// assert!(!Coord::new(0, 0).is_adjacent(Coord::new(1, 1)));
    /// ```
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<[i32; 2]> for Coord {
    fn from(value: [i32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Coord> for [i32; 2] {
    fn from(value: Coord) -> Self {
        [value.x, value.y]
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Tile colours
///
/// The set is closed: per-colour tables are fixed-size arrays indexed by
/// [`TileColor::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl TileColor {
    pub const COUNT: usize = 6;

    pub const ALL: [TileColor; Self::COUNT] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Green,
        TileColor::Yellow,
        TileColor::Purple,
        TileColor::Orange,
    ];

    /// Dense index into per-colour tables.
    pub const fn index(self) -> usize {
        match self {
            TileColor::Red => 0,
            TileColor::Blue => 1,
            TileColor::Green => 2,
            TileColor::Yellow => 3,
            TileColor::Purple => 4,
            TileColor::Orange => 5,
        }
    }

    /// Parse colour from string (case-insensitive)
    ///
    /// ```
    /// use match3_types::TileColor;
    ///
    /// assert_eq!(TileColor::from_str("Blue"), Some(TileColor::Blue));
    /// assert_eq!(TileColor::from_str("ORANGE"), Some(TileColor::Orange));
    /// assert_eq!(TileColor::from_str("pink"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TileColor::Red),
            "blue" => Some(TileColor::Blue),
            "green" => Some(TileColor::Green),
            "yellow" => Some(TileColor::Yellow),
            "purple" => Some(TileColor::Purple),
            "orange" => Some(TileColor::Orange),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileColor::Red => "Red",
            TileColor::Blue => "Blue",
            TileColor::Green => "Green",
            TileColor::Yellow => "Yellow",
            TileColor::Purple => "Purple",
            TileColor::Orange => "Orange",
        }
    }

    /// Single-letter glyph used by text board dumps.
    pub fn glyph(&self) -> char {
        match self {
            TileColor::Red => 'R',
            TileColor::Blue => 'B',
            TileColor::Green => 'G',
            TileColor::Yellow => 'Y',
            TileColor::Purple => 'P',
            TileColor::Orange => 'O',
        }
    }
}

/// Travel axis of a rocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RocketOrientation {
    /// Clears the whole row.
    Horizontal,
    /// Clears the whole column.
    Vertical,
}

/// Special tiles created by long or shaped matches
///
/// - **Rocket**: 4 in a line, clears its row or column
/// - **Bomb**: L/T shape, clears the surrounding 3x3 block
/// - **Disco**: 5+ in a line, clears every tile of one colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialKind {
    Rocket(RocketOrientation),
    Bomb,
    Disco,
}

/// Obstacle kinds. Obstacles never move and are destroyed by damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObstacleKind {
    Crate,
    Stone,
}

impl ObstacleKind {
    pub const COUNT: usize = 2;

    pub const ALL: [ObstacleKind; Self::COUNT] = [ObstacleKind::Crate, ObstacleKind::Stone];

    pub const fn index(self) -> usize {
        match self {
            ObstacleKind::Crate => 0,
            ObstacleKind::Stone => 1,
        }
    }
}

/// Layers that sit on top of a tile and absorb hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayKind {
    Ice,
}

/// Engine lifecycle
///
/// `Idle` → `Running` → `Won` | `Lost`. The last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Idle,
    Running,
    Won,
    Lost,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LevelType {
    #[default]
    Normal,
    /// Clears damage a boss; the level is won when its HP reaches zero.
    BossAttack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalKind {
    CollectColor,
    ClearTiles,
    DestroyObstacles,
    Score,
}

/// In-level boosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoosterType {
    /// Removes (or damages) a single targeted cell.
    Hammer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapResult {
    Accepted,
    Rejected,
}

impl SwapResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapResult::Accepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelResult {
    Win,
    Lose,
}

/// What removed the cells of a [`LogicEvent::MatchClear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearSource {
    Match,
    Special,
    Booster,
}

/// One observable change produced by the engine.
///
/// Events are buffered in emission order and drained by the caller between
/// actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LogicEvent {
    Swap {
        a: Coord,
        b: Coord,
    },
    MatchClear {
        cells: Vec<Coord>,
        source: ClearSource,
    },
    SpecialCreated {
        cell: Coord,
        kind: SpecialKind,
    },
    TileFell {
        from: Coord,
        to: Coord,
    },
    TileSpawned {
        at: Coord,
        color: TileColor,
    },
    ObstacleDamaged {
        cell: Coord,
        kind: ObstacleKind,
        remaining_hp: u32,
    },
    BossDamaged {
        amount: u32,
        remaining_hp: u32,
    },
}

/// Terminal snapshot of a finished level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndResult {
    pub result: LevelResult,
    pub moves_used: u32,
    /// `None` for non-boss levels.
    pub boss_hp_remaining: Option<u32>,
    pub coins_gained: u32,
    pub boosters_used: u32,
}
