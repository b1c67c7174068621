//! Match detection - finds runs of 3+ same-coloured tiles
//!
//! A pass scans every row left to right, then every column bottom to top,
//! collecting runs of matchable cells (`Normal` tiles without an active
//! overlay). Runs that share a coordinate are then merged transitively; a
//! merged group carrying both the horizontal and the vertical flag is an
//! L/T shape.

use crate::grid::Grid;
use crate::types::{Coord, RocketOrientation, SpecialKind, TileColor, MIN_MATCH_LEN};

/// A set of matched coordinates of a single colour.
///
/// Cells are unique and kept in discovery order; merged groups append the
/// new cells of the absorbed group after their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub cells: Vec<Coord>,
    pub color: TileColor,
    pub horizontal: bool,
    pub vertical: bool,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Built from crossing horizontal and vertical runs.
    pub fn is_l_or_t(&self) -> bool {
        self.horizontal && self.vertical
    }

    /// Cell that receives the special tile, `cells[len / 2]`.
    pub fn anchor(&self) -> Coord {
        self.cells[self.cells.len() / 2]
    }

    /// Special tile created by this shape, if any
    ///
    /// - L/T shape: Bomb
    /// - 4 in a line: Rocket along the run axis
    /// - 5+ in a line: Disco
    /// - 3 in a line: nothing
    pub fn special_to_spawn(&self) -> Option<SpecialKind> {
        if self.is_l_or_t() {
            return Some(SpecialKind::Bomb);
        }
        match self.len() {
            4 => {
                let orientation = if self.horizontal {
                    RocketOrientation::Horizontal
                } else {
                    RocketOrientation::Vertical
                };
                Some(SpecialKind::Rocket(orientation))
            }
            n if n >= 5 => Some(SpecialKind::Disco),
            _ => None,
        }
    }

    pub fn contains(&self, pos: Coord) -> bool {
        self.cells.contains(&pos)
    }

    fn shares_cell(&self, other: &MatchGroup) -> bool {
        other.cells.iter().any(|c| self.contains(*c))
    }

    fn absorb(&mut self, other: MatchGroup) {
        for c in other.cells {
            if !self.contains(c) {
                self.cells.push(c);
            }
        }
        self.horizontal |= other.horizontal;
        self.vertical |= other.vertical;
    }
}

/// Find every match on the grid.
pub fn find_matches(grid: &Grid) -> Vec<MatchGroup> {
    let mut groups = Vec::new();
    let (w, h) = (grid.width() as i32, grid.height() as i32);

    for y in 0..h {
        scan_line(grid, &mut groups, w, |i| Coord::new(i, y), true);
    }
    for x in 0..w {
        scan_line(grid, &mut groups, h, |i| Coord::new(x, i), false);
    }

    merge_overlapping(groups)
}

/// Cheaper check used where only presence matters.
pub fn has_matches(grid: &Grid) -> bool {
    !find_matches(grid).is_empty()
}

fn scan_line(
    grid: &Grid,
    groups: &mut Vec<MatchGroup>,
    len: i32,
    at: impl Fn(i32) -> Coord,
    horizontal: bool,
) {
    let mut start = 0;
    while start < len {
        let Some(color) = matchable_color(grid, at(start)) else {
            start += 1;
            continue;
        };

        let mut end = start + 1;
        while end < len && matchable_color(grid, at(end)) == Some(color) {
            end += 1;
        }

        if (end - start) as usize >= MIN_MATCH_LEN {
            groups.push(MatchGroup {
                cells: (start..end).map(&at).collect(),
                color,
                horizontal,
                vertical: !horizontal,
            });
        }
        start = end;
    }
}

fn matchable_color(grid: &Grid, pos: Coord) -> Option<TileColor> {
    grid.get(pos)
        .filter(|cell| cell.is_matchable())
        .and_then(|cell| cell.normal_color())
}

/// Union groups sharing a coordinate until no two groups overlap.
fn merge_overlapping(mut groups: Vec<MatchGroup>) -> Vec<MatchGroup> {
    loop {
        let mut pair = None;
        'search: for i in 0..groups.len() {
            for j in (i + 1)..groups.len() {
                if groups[i].shares_cell(&groups[j]) {
                    pair = Some((i, j));
                    break 'search;
                }
            }
        }

        let Some((i, j)) = pair else {
            return groups;
        };
        let other = groups.remove(j);
        groups[i].absorb(other);
    }
}
