//! Move preview and commit for dragged cell groups
//!
//! Validation is a pure read of the current grid. Candidates keep the
//! positions captured at drag start; the translation is the offset from the
//! drag anchor to the hovered cell.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Cell, Grid, Position, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropStatus {
    Valid,
    Colliding,
}

/// Destination of one candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPreview {
    pub pos: Position,
    pub status: DropStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovePreview {
    pub cells: Vec<DropPreview>,
    pub collision: bool,
}

impl MovePreview {
    pub fn status_at(&self, pos: Position) -> Option<DropStatus> {
        self.cells.iter().find(|p| p.pos == pos).map(|p| p.status)
    }
}

/// Compute the destination of every candidate under translation `delta`.
///
/// A destination collides if it lies outside the grid, or if it holds an
/// occupied cell that is not itself being moved.
pub fn validate_move(grid: &Grid, candidates: &[Position], delta: (i32, i32)) -> MovePreview {
    let moving: HashSet<Position> = candidates.iter().copied().collect();
    let mut collision = false;
    let cells = candidates
        .iter()
        .map(|&from| {
            let pos = from.offset(delta);
            let colliding = !grid.contains(pos) || (grid.is_occupied(pos) && !moving.contains(&pos));
            collision |= colliding;
            DropPreview {
                pos,
                status: if colliding { DropStatus::Colliding } else { DropStatus::Valid },
            }
        })
        .collect();
    MovePreview { cells, collision }
}

/// Build the grid after moving `candidates` by `delta`.
///
/// Returns `Ok(None)` when the move collides. All sources are cleared before
/// any destination is written, so overlapping translations are safe.
pub fn apply_move(grid: &Grid, candidates: &[Position], delta: (i32, i32)) -> Result<Option<Grid>> {
    if validate_move(grid, candidates, delta).collision {
        return Ok(None);
    }

    let mut moved: Vec<(Position, Cell)> = Vec::with_capacity(candidates.len());
    let mut changes: Vec<(Position, Cell)> = Vec::with_capacity(candidates.len() * 2);
    for &from in candidates {
        let cell = grid.get(from)?.clone();
        changes.push((from, Cell::empty()));
        moved.push((from.offset(delta), cell));
    }
    changes.extend(moved);
    grid.set_cells(changes).map(Some)
}
