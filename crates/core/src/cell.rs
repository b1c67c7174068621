//! Cell module - a single grid slot
//!
//! A cell holds exactly one [`Tile`] plus an optional [`Overlay`]. Cells are
//! plain `Copy` values; the grid exchanges them by full-state copy, so a
//! reverted swap restores both cells exactly.

use crate::types::{ObstacleKind, OverlayKind, RocketOrientation, SpecialKind, TileColor};

/// An obstacle with its remaining hit points (always > 0 while on the board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub hp: u32,
}

/// A special tile. `color` is the colour of the match that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Special {
    pub kind: SpecialKind,
    pub color: TileColor,
}

/// The tile occupying a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    Normal(TileColor),
    Special(Special),
    Obstacle(Obstacle),
}

/// A layer on top of a tile with its remaining hit points (always > 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub hp: u32,
}

/// Result of one hit on an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleHit {
    pub kind: ObstacleKind,
    pub remaining_hp: u32,
}

impl ObstacleHit {
    pub fn destroyed(&self) -> bool {
        self.remaining_hp == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub tile: Tile,
    pub overlay: Option<Overlay>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        tile: Tile::Empty,
        overlay: None,
    };

    pub fn normal(color: TileColor) -> Self {
        Self {
            tile: Tile::Normal(color),
            overlay: None,
        }
    }

    pub fn special(kind: SpecialKind, color: TileColor) -> Self {
        Self {
            tile: Tile::Special(Special { kind, color }),
            overlay: None,
        }
    }

    pub fn obstacle(kind: ObstacleKind, hp: u32) -> Self {
        let mut cell = Self::EMPTY;
        cell.set_obstacle(kind, hp);
        cell
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.tile, Tile::Empty)
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self.tile, Tile::Obstacle(_))
    }

    pub fn is_swappable(&self) -> bool {
        !self.is_empty() && !self.is_obstacle()
    }

    pub fn has_overlay(&self) -> bool {
        matches!(self.overlay, Some(o) if o.hp > 0)
    }

    /// `Normal` tile without an active overlay.
    pub fn is_matchable(&self) -> bool {
        matches!(self.tile, Tile::Normal(_)) && !self.has_overlay()
    }

    /// Colour of a `Normal` tile.
    pub fn normal_color(&self) -> Option<TileColor> {
        match self.tile {
            Tile::Normal(color) => Some(color),
            _ => None,
        }
    }

    pub fn as_special(&self) -> Option<Special> {
        match self.tile {
            Tile::Special(special) => Some(special),
            _ => None,
        }
    }

    /// Reset to `Empty`, dropping any overlay.
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    pub fn set_normal(&mut self, color: TileColor) {
        self.tile = Tile::Normal(color);
    }

    pub fn set_special(&mut self, kind: SpecialKind, color: TileColor) {
        self.tile = Tile::Special(Special { kind, color });
    }

    /// Place an obstacle. A zero `hp` leaves the cell empty; any overlay is dropped.
    pub fn set_obstacle(&mut self, kind: ObstacleKind, hp: u32) {
        self.overlay = None;
        if hp == 0 {
            self.tile = Tile::Empty;
            return;
        }
        self.tile = Tile::Obstacle(Obstacle { kind, hp });
    }

    /// Attach an overlay. A zero `hp` removes it.
    pub fn set_overlay(&mut self, kind: OverlayKind, hp: u32) {
        self.overlay = if hp == 0 {
            None
        } else {
            Some(Overlay { kind, hp })
        };
    }

    /// Apply one hit to the obstacle in this cell, if any.
    ///
    /// The cell becomes empty in the same step the obstacle reaches 0 hp.
    pub fn damage_obstacle(&mut self) -> Option<ObstacleHit> {
        let Tile::Obstacle(ref mut obstacle) = self.tile else {
            return None;
        };
        obstacle.hp = obstacle.hp.saturating_sub(1);
        let hit = ObstacleHit {
            kind: obstacle.kind,
            remaining_hp: obstacle.hp,
        };
        if hit.destroyed() {
            self.clear();
        }
        Some(hit)
    }

    /// Apply one hit to the overlay, if any. Returns whether an overlay absorbed it.
    pub fn damage_overlay(&mut self) -> bool {
        let Some(mut overlay) = self.overlay else {
            return false;
        };
        overlay.hp = overlay.hp.saturating_sub(1);
        self.overlay = if overlay.hp == 0 { None } else { Some(overlay) };
        true
    }

    /// Single-character glyph for text dumps.
    ///
    /// Normal tiles use their colour letter (lowercase under ice), rockets
    /// `-`/`|`, bombs `*`, discos `@`, crates `#`, stones `%`, empty `.`.
    pub fn glyph(&self) -> char {
        let c = match self.tile {
            Tile::Empty => '.',
            Tile::Normal(color) => color.glyph(),
            Tile::Special(special) => match special.kind {
                SpecialKind::Rocket(RocketOrientation::Horizontal) => '-',
                SpecialKind::Rocket(RocketOrientation::Vertical) => '|',
                SpecialKind::Bomb => '*',
                SpecialKind::Disco => '@',
            },
            Tile::Obstacle(obstacle) => match obstacle.kind {
                ObstacleKind::Crate => '#',
                ObstacleKind::Stone => '%',
            },
        };
        if self.has_overlay() {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }

    /// Stable 4-byte encoding: tag, kind/colour, hp, overlay hp.
    pub fn encode(&self) -> [u8; 4] {
        let clamp = |hp: u32| hp.min(u8::MAX as u32) as u8;
        let overlay_hp = self.overlay.map(|o| clamp(o.hp)).unwrap_or(0);
        match self.tile {
            Tile::Empty => [0, 0, 0, overlay_hp],
            Tile::Normal(color) => [1, color.index() as u8, 0, overlay_hp],
            Tile::Special(special) => {
                let kind = match special.kind {
                    SpecialKind::Rocket(RocketOrientation::Horizontal) => 0u8,
                    SpecialKind::Rocket(RocketOrientation::Vertical) => 1,
                    SpecialKind::Bomb => 2,
                    SpecialKind::Disco => 3,
                };
                [2, kind * 8 + special.color.index() as u8, 0, overlay_hp]
            }
            Tile::Obstacle(obstacle) => [
                3,
                obstacle.kind.index() as u8,
                clamp(obstacle.hp),
                overlay_hp,
            ],
        }
    }
}
