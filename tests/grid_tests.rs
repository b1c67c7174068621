//! Grid tests - bounds, neighbours and full-state swaps

use match3_sim::core::{Cell, Grid};
use match3_sim::types::{Coord, ObstacleKind, OverlayKind, SpecialKind, TileColor};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(7, 5);
    assert_eq!(grid.width(), 7);
    assert_eq!(grid.height(), 5);
    assert_eq!(grid.cells().len(), 35);
    assert!(grid.cells().iter().all(Cell::is_empty));
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new(5, 5);

    assert!(grid.get(Coord::new(-1, 0)).is_none());
    assert!(grid.get(Coord::new(0, -1)).is_none());
    assert!(grid.get(Coord::new(5, 0)).is_none());
    assert!(grid.get(Coord::new(0, 5)).is_none());
    assert!(grid.get(Coord::new(4, 4)).is_some());
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::new(5, 5);

    assert!(grid.set(Coord::new(3, 1), Cell::normal(TileColor::Purple)));
    assert_eq!(grid.get(Coord::new(3, 1)), Some(&Cell::normal(TileColor::Purple)));
    assert!(!grid.set(Coord::new(5, 1), Cell::normal(TileColor::Purple)));
}

#[test]
fn test_neighbors_are_orthogonal_and_clipped() {
    let grid = Grid::new(5, 5);

    for pos in grid.coords() {
        let neighbors = grid.neighbors(pos);
        for n in &neighbors {
            assert!(grid.in_bounds(*n));
            assert_eq!(pos.manhattan(*n), 1);
        }
        let expected = [pos.x > 0, pos.x < 4, pos.y > 0, pos.y < 4]
            .iter()
            .filter(|b| **b)
            .count();
        assert_eq!(neighbors.len(), expected, "at {pos}");
    }
}

#[test]
fn test_swap_and_revert_restores_exact_state() {
    let mut grid = Grid::new(5, 5);
    let a = Coord::new(1, 1);
    let b = Coord::new(2, 1);

    let mut iced = Cell::normal(TileColor::Blue);
    iced.set_overlay(OverlayKind::Ice, 2);
    grid.set(a, iced);
    grid.set(b, Cell::special(SpecialKind::Bomb, TileColor::Green));
    let before = grid.clone();

    assert!(grid.swap(a, b));
    assert_eq!(grid[a], Cell::special(SpecialKind::Bomb, TileColor::Green));
    assert_eq!(grid[b], iced);

    assert!(grid.swap(a, b));
    assert_eq!(grid, before);
}

#[test]
fn test_clear_resets_overlay_and_obstacle() {
    let mut grid = Grid::new(5, 5);
    let pos = Coord::new(0, 0);
    grid.set(pos, Cell::obstacle(ObstacleKind::Stone, 3));
    grid[pos].clear();
    assert_eq!(grid[pos], Cell::EMPTY);

    grid.set(pos, Cell::normal(TileColor::Red));
    grid[pos].set_overlay(OverlayKind::Ice, 1);
    grid[pos].clear();
    assert!(!grid[pos].has_overlay());
}

#[test]
fn test_display_matches_rows() {
    let rows = ["R#B", "g.Y", "*|@"];
    let grid = Grid::from_rows(&rows).unwrap();
    assert_eq!(grid.to_string(), "R#B\ng.Y\n*|@\n");
}
