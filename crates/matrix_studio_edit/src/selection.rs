use std::collections::BTreeSet;

use crate::{Grid, Position};

/// A set of selected cell positions.
///
/// Iteration is always in row-major order regardless of insertion order, so
/// batch operations over a selection are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    cells: BTreeSet<Position>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(pos: Position) -> Self {
        let mut sel = Self::new();
        sel.cells.insert(pos);
        sel
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn insert(&mut self, pos: Position) -> bool {
        self.cells.insert(pos)
    }

    pub fn remove(&mut self, pos: Position) -> bool {
        self.cells.remove(&pos)
    }

    /// Add `pos` if missing, remove it otherwise. Returns true if it is now selected.
    pub fn toggle(&mut self, pos: Position) -> bool {
        if self.cells.remove(&pos) {
            false
        } else {
            self.cells.insert(pos);
            true
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Position> {
        self.iter().collect()
    }

    /// Drop members that no longer address an occupied cell of `grid`
    pub fn retain_occupied(&mut self, grid: &Grid) {
        self.cells.retain(|pos| grid.is_occupied(*pos));
    }
}

impl FromIterator<Position> for Selection {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
