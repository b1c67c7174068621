//! Spawn table - weighted colour draws for new tiles

use std::collections::BTreeMap;

use crate::level::BoardConfig;
use crate::rng::SeededRandom;
use crate::types::{TileColor, DEFAULT_SPAWN_WEIGHT};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnTable {
    colors: Vec<TileColor>,
    weights: Vec<u32>,
}

impl SpawnTable {
    /// Colours in configured order. Weight: level weight if positive, else
    /// the remote default if positive, else 1.
    pub fn build(board: &BoardConfig, defaults: &BTreeMap<TileColor, u32>) -> Self {
        let weights = board
            .colors
            .iter()
            .map(|color| {
                [board.spawn_weights.get(color), defaults.get(color)]
                    .into_iter()
                    .flatten()
                    .copied()
                    .find(|&w| w > 0)
                    .unwrap_or(DEFAULT_SPAWN_WEIGHT)
            })
            .collect();

        Self {
            colors: board.colors.clone(),
            weights,
        }
    }

    pub fn colors(&self) -> &[TileColor] {
        &self.colors
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Draw a colour. The table must not be empty.
    pub fn pick(&self, rng: &mut SeededRandom) -> TileColor {
        let idx = rng.weighted_select(&self.weights);
        self.colors[idx]
    }

    /// Draw a colour not in `forbidden`, proportionally to the remaining
    /// weights. Falls back to [`SpawnTable::pick`] when nothing remains.
    pub fn pick_avoiding(&self, rng: &mut SeededRandom, forbidden: &[TileColor]) -> TileColor {
        if forbidden.is_empty() {
            return self.pick(rng);
        }

        let allowed = |i: &usize| !forbidden.contains(&self.colors[*i]);
        let total: u64 = (0..self.colors.len())
            .filter(allowed)
            .map(|i| self.weights[i] as u64)
            .sum();
        if total == 0 {
            return self.pick(rng);
        }

        let roll = rng.next_below(total);
        let mut cumulative = 0u64;
        let mut last = 0;
        for i in (0..self.colors.len()).filter(allowed) {
            cumulative += self.weights[i] as u64;
            last = i;
            if roll < cumulative {
                return self.colors[i];
            }
        }
        self.colors[last]
    }
}
