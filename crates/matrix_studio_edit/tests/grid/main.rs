//! Grid store tests
//!
//! Tests construction, bounds handling, resize and structural sharing.

use matrix_studio_edit::{Cell, EditError, Grid, GroupIndex, GroupIndexCache, Position};
use pretty_assertions::assert_eq;

fn cell(device: &str, pixel: i32) -> Cell {
    Cell::new(device, pixel, "")
}

/// Grid with every cell occupied, pixel = row * 100 + col
fn numbered_grid(rows: usize, cols: usize) -> Grid {
    let data = (0..rows)
        .map(|r| (0..cols).map(|c| cell("d", (r * 100 + c) as i32)).collect())
        .collect();
    Grid::from_rows(data).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_grid_is_empty() {
    let grid = Grid::new(3, 4);
    assert_eq!(grid.size(), (3, 4));
    assert_eq!(grid.occupied_count(), 0);
    assert!(grid.iter().all(|(_, c)| c.is_empty()));
}

#[test]
fn test_zero_rows_means_zero_cols() {
    let grid = Grid::new(0, 5);
    assert_eq!(grid.size(), (0, 0));
}

#[test]
fn test_from_rows_rejects_ragged_data() {
    let data = vec![vec![cell("a", 0), cell("a", 1)], vec![cell("a", 2)]];
    let err = Grid::from_rows(data).unwrap_err();
    assert!(matches!(err, EditError::NotRectangular { row: 1, expected: 2, actual: 1 }));
}

#[test]
fn test_from_data_fitted_pads_and_truncates() {
    let data = vec![vec![cell("a", 0), cell("a", 1), cell("a", 2)], vec![cell("b", 0)]];
    let grid = Grid::from_data_fitted(&data, 3, 2);
    assert_eq!(grid.size(), (3, 2));
    assert_eq!(grid.cell(Position::new(0, 1)), Some(&cell("a", 1)));
    assert_eq!(grid.cell(Position::new(1, 0)), Some(&cell("b", 0)));
    assert_eq!(grid.cell(Position::new(1, 1)), Some(&Cell::empty()));
    assert_eq!(grid.cell(Position::new(2, 0)), Some(&Cell::empty()));
}

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn test_out_of_range_access() {
    let grid = Grid::new(2, 2);
    assert!(grid.cell(Position::new(2, 0)).is_none());
    assert!(grid.cell(Position::new(0, -1)).is_none());
    assert!(matches!(grid.get(Position::new(5, 5)), Err(EditError::OutOfRange { row: 5, col: 5, .. })));
    assert!(grid.set_cell(Position::new(-1, 0), cell("a", 0)).is_err());
}

#[test]
fn test_set_cells_is_all_or_nothing() {
    let grid = Grid::new(2, 2);
    let result = grid.set_cells(vec![(Position::new(0, 0), cell("a", 0)), (Position::new(3, 3), cell("a", 1))]);
    assert!(result.is_err());
    assert_eq!(grid.occupied_count(), 0);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_preserves_overlap() {
    let grid = numbered_grid(4, 5);
    for (rows, cols) in [(4, 5), (2, 3), (6, 7), (1, 9), (8, 1)] {
        let resized = grid.resize(rows, cols);
        assert_eq!(resized.size(), (rows, cols));
        for (pos, c) in resized.iter() {
            let (r, col) = (pos.row as usize, pos.col as usize);
            if r < 4 && col < 5 {
                assert_eq!(c, grid.cell(pos).unwrap(), "at {pos} for {rows}x{cols}");
            } else {
                assert_eq!(c, &Cell::empty(), "at {pos} for {rows}x{cols}");
            }
        }
    }
}

#[test]
fn test_resize_keeps_row_identity_when_width_unchanged() {
    let grid = numbered_grid(3, 3);
    let taller = grid.resize(5, 3);
    assert!(taller.row_ptr_eq(&grid, 0));
    assert!(taller.row_ptr_eq(&grid, 2));
}

// ============================================================================
// Structural sharing
// ============================================================================

#[test]
fn test_set_cell_copies_only_touched_row() {
    let grid = numbered_grid(3, 3);
    let edited = grid.set_cell(Position::new(1, 1), cell("x", 9)).unwrap();
    assert!(edited.row_ptr_eq(&grid, 0));
    assert!(!edited.row_ptr_eq(&grid, 1));
    assert!(edited.row_ptr_eq(&grid, 2));
    assert!(!edited.ptr_eq(&grid));
    assert_eq!(grid.cell(Position::new(1, 1)), Some(&cell("d", 101)));
}

#[test]
fn test_iteration_is_row_major() {
    let grid = Grid::new(2, 2);
    let order: Vec<Position> = grid.iter().map(|(p, _)| p).collect();
    assert_eq!(order, vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]);
}

// ============================================================================
// Group index
// ============================================================================

#[test]
fn test_group_index_ignores_empty_cells() {
    let grid = Grid::new(2, 3)
        .set_cells(vec![
            (Position::new(0, 0), Cell::new("d", 0, "g1")),
            (Position::new(1, 2), Cell::new("d", 1, "g1")),
            (Position::new(0, 1), Cell::new("d", 2, "g2")),
            (Position::new(1, 0), Cell::new("", 0, "g3")),
        ])
        .unwrap();
    let index = GroupIndex::build(&grid);
    assert_eq!(index.members("g1"), &[Position::new(0, 0), Position::new(1, 2)]);
    assert_eq!(index.members("g2"), &[Position::new(0, 1)]);
    assert!(!index.contains("g3"));
    assert_eq!(index.next_free_name("g", 1), "g3");
}

#[test]
fn test_group_index_cache_rebuilds_on_change() {
    let grid = Grid::new(1, 2).set_cell(Position::new(0, 0), Cell::new("d", 0, "a")).unwrap();
    let mut cache = GroupIndexCache::new();
    let first = cache.get(&grid);
    let again = cache.get(&grid.clone());
    assert!(std::sync::Arc::ptr_eq(&first, &again));

    let edited = grid.set_cell(Position::new(0, 1), Cell::new("d", 1, "b")).unwrap();
    let rebuilt = cache.get(&edited);
    assert!(rebuilt.contains("b"));
}
