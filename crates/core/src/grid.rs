//! Grid module - manages the playfield
//!
//! The grid is a `width x height` array of [`Cell`]s stored flat in row-major
//! order (`y * width + x`) for cache locality. Every in-bounds coordinate maps
//! to exactly one slot; cells are exchanged by value, never aliased.
//!
//! Coordinates: `x` grows to the right, `y` grows upward (`y = 0` is the
//! bottom row, where tiles settle).

use std::fmt;
use std::ops::{Index, IndexMut};

use arrayvec::ArrayVec;

use crate::cell::Cell;
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index_of(&self, pos: Coord) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(pos.y as usize * self.width + pos.x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Get cell at position. Returns None if out of bounds
    pub fn get(&self, pos: Coord) -> Option<&Cell> {
        self.index_of(pos).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, pos: Coord) -> Option<&mut Cell> {
        self.index_of(pos).map(move |idx| &mut self.cells[idx])
    }

    /// Set cell at position. Returns false if out of bounds
    pub fn set(&mut self, pos: Coord, cell: Cell) -> bool {
        match self.get_mut(pos) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Orthogonal neighbours clipped to bounds, in left/right/down/up order.
    pub fn neighbors(&self, pos: Coord) -> ArrayVec<Coord, 4> {
        let mut out = ArrayVec::new();
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let n = pos.offset(dx, dy);
            if self.in_bounds(n) {
                out.push(n);
            }
        }
        out
    }

    /// Exchange the full state of two cells. Returns false if either is out of bounds
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// All coordinates, column by column, bottom to top.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w).flat_map(move |x| (0..h).map(move |y| Coord::new(x, y)))
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a grid from text rows, top row first (see [`Cell::glyph`]).
    ///
    /// Unknown glyphs become empty cells. Rows must have equal length.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        use crate::types::{ObstacleKind, OverlayKind, RocketOrientation, SpecialKind, TileColor};

        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if rows.iter().any(|r| r.chars().count() != width) {
            return None;
        }

        let mut grid = Grid::new(width, height);
        for (row_idx, row) in rows.iter().enumerate() {
            let y = (height - 1 - row_idx) as i32;
            for (x, ch) in row.chars().enumerate() {
                let upper = ch.to_ascii_uppercase();
                let color = TileColor::ALL.iter().copied().find(|c| c.glyph() == upper);
                let mut cell = match (ch, color) {
                    (_, Some(color)) => Cell::normal(color),
                    ('-', None) => Cell::special(
                        SpecialKind::Rocket(RocketOrientation::Horizontal),
                        TileColor::Red,
                    ),
                    ('|', None) => Cell::special(
                        SpecialKind::Rocket(RocketOrientation::Vertical),
                        TileColor::Red,
                    ),
                    ('*', None) => Cell::special(SpecialKind::Bomb, TileColor::Red),
                    ('@', None) => Cell::special(SpecialKind::Disco, TileColor::Red),
                    ('#', None) => Cell::obstacle(ObstacleKind::Crate, 1),
                    ('%', None) => Cell::obstacle(ObstacleKind::Stone, 3),
                    _ => Cell::EMPTY,
                };
                if color.is_some() && ch.is_ascii_lowercase() {
                    cell.set_overlay(OverlayKind::Ice, 1);
                }
                grid.cells[y as usize * width + x] = cell;
            }
        }
        Some(grid)
    }
}

impl Index<Coord> for Grid {
    type Output = Cell;

    /// # Panics
    ///
    /// Panics if `pos` is out of bounds, in every build profile. Use
    /// [`Grid::get`] for untrusted coordinates.
    fn index(&self, pos: Coord) -> &Cell {
        match self.index_of(pos) {
            Some(idx) => &self.cells[idx],
            None => out_of_bounds(pos, self.width, self.height),
        }
    }
}

impl IndexMut<Coord> for Grid {
    /// # Panics
    ///
    /// Same as [`Index`]: out-of-bounds coordinates panic.
    fn index_mut(&mut self, pos: Coord) -> &mut Cell {
        match self.index_of(pos) {
            Some(idx) => &mut self.cells[idx],
            None => out_of_bounds(pos, self.width, self.height),
        }
    }
}

#[cold]
#[track_caller]
fn out_of_bounds(pos: Coord, width: usize, height: usize) -> ! {
    panic!("{pos} out of bounds for {width}x{height} grid")
}

/// Text dump, top row first, one glyph per cell.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            let start = y * self.width;
            for cell in &self.cells[start..start + self.width] {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
