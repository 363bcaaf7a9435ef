use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell address in the grid. Ordering is row-major, so sorted collections
/// of positions enumerate cells top-left to bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Offset from `other` to `self` as (rows, cols)
    pub fn delta_from(self, other: Position) -> (i32, i32) {
        (self.row - other.row, self.col - other.col)
    }

    pub fn offset(self, delta: (i32, i32)) -> Position {
        Position::new(self.row + delta.0, self.col + delta.1)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
