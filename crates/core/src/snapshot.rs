//! Owned point-in-time copy of an engine, for replay tooling and tests.

use crate::cell::Cell;
use crate::types::GameState;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64-bit.
pub fn fnv1a64(bytes: impl IntoIterator<Item = u8>) -> u64 {
    let mut h = FNV_OFFSET_BASIS;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major (`y * width + x`).
    pub cells: Vec<Cell>,
    pub state: GameState,
    pub remaining_moves: u32,
    pub boss_hp: Option<u32>,
    pub moves_used: u32,
    pub boosters_used: u32,
}

impl GameSnapshot {
    /// Hash of the board contents only; counters do not contribute.
    pub fn board_hash(&self) -> u64 {
        fnv1a64(self.cells.iter().flat_map(|cell| cell.encode()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileColor;

    #[test]
    fn test_fnv_known_values() {
        assert_eq!(fnv1a64([]), 0xcbf29ce484222325);
        assert_eq!(fnv1a64(*b"a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn test_board_hash_ignores_counters() {
        let snap = GameSnapshot {
            width: 1,
            height: 1,
            cells: vec![Cell::normal(TileColor::Red)],
            state: GameState::Running,
            remaining_moves: 5,
            boss_hp: None,
            moves_used: 0,
            boosters_used: 0,
        };
        let mut other = snap.clone();
        other.remaining_moves = 1;
        assert_eq!(snap.board_hash(), other.board_hash());

        other.cells[0] = Cell::normal(TileColor::Blue);
        assert_ne!(snap.board_hash(), other.board_hash());
    }
}
