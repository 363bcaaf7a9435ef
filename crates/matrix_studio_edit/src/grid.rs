//! The authoritative 2D grid of cells
//!
//! A [`Grid`] is an immutable value: every edit returns a new grid. Rows are
//! reference counted, so an edit only copies the rows it touches and all other
//! rows keep their identity. [`Grid::ptr_eq`] is the cheap "did anything
//! change" test used by the derived caches.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Cell, EditError, Position, Result};

type Row = Arc<Vec<Cell>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: Arc<Vec<Row>>,
    cols: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Grid {
    /// Create a grid of empty cells
    pub fn new(rows: usize, cols: usize) -> Self {
        let cols = if rows == 0 { 0 } else { cols };
        Self {
            rows: Arc::new((0..rows).map(|_| Arc::new(vec![Cell::empty(); cols])).collect()),
            cols,
        }
    }

    /// Build a grid from row data, rejecting non-rectangular input
    pub fn from_rows(data: Vec<Vec<Cell>>) -> Result<Self> {
        let cols = data.first().map_or(0, Vec::len);
        for (row, cells) in data.iter().enumerate() {
            if cells.len() != cols {
                return Err(EditError::NotRectangular {
                    row,
                    expected: cols,
                    actual: cells.len(),
                });
            }
        }
        let cols = if data.is_empty() { 0 } else { cols };
        Ok(Self {
            rows: Arc::new(data.into_iter().map(|row| Arc::new(row.into_iter().map(Cell::normalized).collect())).collect()),
            cols,
        })
    }

    /// Build a grid of exactly `rows`×`cols` from arbitrary (possibly ragged)
    /// data: missing cells are padded with the empty sentinel, extra cells are
    /// dropped.
    pub fn from_data_fitted(data: &[Vec<Cell>], rows: usize, cols: usize) -> Self {
        let cols = if rows == 0 { 0 } else { cols };
        let rows = (0..rows)
            .map(|r| {
                Arc::new(
                    (0..cols)
                        .map(|c| data.get(r).and_then(|row| row.get(c)).cloned().map(Cell::normalized).unwrap_or_default())
                        .collect(),
                )
            })
            .collect();
        Self { rows: Arc::new(rows), cols }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn size(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && (pos.row as usize) < self.rows() && (pos.col as usize) < self.cols
    }

    /// Cell at `pos`, or `None` outside the grid
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if !self.contains(pos) {
            return None;
        }
        Some(&self.rows[pos.row as usize][pos.col as usize])
    }

    pub fn get(&self, pos: Position) -> Result<&Cell> {
        self.cell(pos).ok_or_else(|| self.out_of_range(pos))
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_occupied)
    }

    /// True if both grids share the same storage (no edit happened in between)
    pub fn ptr_eq(&self, other: &Grid) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
    }

    /// True if row `row` of both grids shares the same storage
    pub fn row_ptr_eq(&self, other: &Grid, row: usize) -> bool {
        match (self.rows.get(row), other.rows.get(row)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Build a new grid of the target size. Cells inside the overlap of the old
    /// and new bounds are kept, everything else is empty.
    pub fn resize(&self, rows: usize, cols: usize) -> Grid {
        let cols = if rows == 0 { 0 } else { cols };
        let new_rows = (0..rows)
            .map(|r| match self.rows.get(r) {
                Some(row) if cols == self.cols => row.clone(),
                Some(row) => Arc::new((0..cols).map(|c| row.get(c).cloned().unwrap_or_default()).collect()),
                None => Arc::new(vec![Cell::empty(); cols]),
            })
            .collect();
        Grid {
            rows: Arc::new(new_rows),
            cols,
        }
    }

    /// Replace a single cell
    pub fn set_cell(&self, pos: Position, cell: Cell) -> Result<Grid> {
        self.set_cells([(pos, cell)])
    }

    /// Replace the given cells in one step. Fails without producing a grid if
    /// any position is out of range. Later entries win on duplicate positions.
    /// Cells without a device are stored as the empty sentinel.
    pub fn set_cells(&self, changes: impl IntoIterator<Item = (Position, Cell)>) -> Result<Grid> {
        let changes: Vec<(Position, Cell)> = changes.into_iter().collect();
        if let Some((pos, _)) = changes.iter().find(|(pos, _)| !self.contains(*pos)) {
            return Err(self.out_of_range(*pos));
        }

        let mut rows: Vec<Row> = self.rows.as_ref().clone();
        for (pos, cell) in changes {
            Arc::make_mut(&mut rows[pos.row as usize])[pos.col as usize] = cell.normalized();
        }
        Ok(Grid {
            rows: Arc::new(rows),
            cols: self.cols,
        })
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| (Position::new(r as i32, c as i32), cell)))
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.iter().filter(|(_, cell)| cell.is_occupied())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows.iter().map(|r| r.as_ref().clone()).collect()
    }

    fn out_of_range(&self, pos: Position) -> EditError {
        EditError::OutOfRange {
            row: pos.row,
            col: pos.col,
            rows: self.rows(),
            cols: self.cols,
        }
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows.iter().map(|r| r.as_slice()))
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let data = Vec::<Vec<Cell>>::deserialize(deserializer)?;
        Grid::from_rows(data).map_err(serde::de::Error::custom)
    }
}
