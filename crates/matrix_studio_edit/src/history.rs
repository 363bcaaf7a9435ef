//! Snapshot history for the grid
//!
//! The history is a bounded list of [`Grid`] snapshots plus a cursor:
//! - `push` drops every redo entry past the cursor, appends, then drops the
//!   oldest entries while over capacity
//! - `undo`/`redo` only move the cursor
//! - `reset` collapses everything into a single baseline entry
//!
//! Because grids share unchanged rows, a snapshot costs one row copy per
//! touched row, not a full grid copy.

use std::collections::VecDeque;

use crate::{Grid, Result};

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 512;

/// Trait for types that support undo/redo operations
pub trait UndoState {
    /// Get description of the next undo operation
    fn undo_description(&self) -> Option<String>;

    /// Check if undo is available
    fn can_undo(&self) -> bool;

    /// Perform undo operation
    fn undo(&mut self) -> Result<()>;

    /// Get description of the next redo operation
    fn redo_description(&self) -> Option<String>;

    /// Check if redo is available
    fn can_redo(&self) -> bool;

    /// Perform redo operation
    fn redo(&mut self) -> Result<()>;
}

#[derive(Clone, Debug)]
struct HistoryEntry {
    id: u64,
    grid: Grid,
    description: String,
}

#[derive(Clone, Debug)]
pub struct GridHistory {
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    capacity: usize,
    next_id: u64,
}

impl GridHistory {
    /// Create a history whose only entry is `grid`. A capacity of 0 is treated as 1.
    pub fn new(grid: Grid, capacity: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(HistoryEntry {
            id: 0,
            grid,
            description: String::new(),
        });
        Self {
            entries,
            cursor: 0,
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> &Grid {
        &self.entries[self.cursor].grid
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Identity of the entry at the cursor. Ids are never reused, so a caller
    /// can tell whether the entry it pushed is still the current one.
    pub fn current_id(&self) -> u64 {
        self.entries[self.cursor].id
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Append `grid` as the new tail and return its entry id
    pub fn push(&mut self, grid: Grid, description: impl Into<String>) -> u64 {
        let id = self.alloc_id();
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(HistoryEntry {
            id,
            grid,
            description: description.into(),
        });
        self.trim_front();
        id
    }

    fn trim_front(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Replace the snapshot at the cursor without adding a step. Redo entries
    /// are dropped, as the amended state starts a new branch.
    pub fn amend(&mut self, grid: Grid) {
        self.entries.truncate(self.cursor + 1);
        self.entries[self.cursor].grid = grid;
    }

    pub fn undo(&mut self) -> Option<&Grid> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&Grid> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Collapse the history into a single baseline entry
    pub fn reset(&mut self, grid: Grid) {
        let id = self.alloc_id();
        self.entries.clear();
        self.entries.push_back(HistoryEntry {
            id,
            grid,
            description: String::new(),
        });
        self.cursor = 0;
    }

    /// Change the capacity. When shrinking, redo entries go first, then the
    /// oldest undo entries. The snapshot at the cursor is always kept.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        if self.entries.len() > self.capacity {
            self.entries.truncate(self.cursor + 1);
            self.trim_front();
        }
    }

    /// Description of the step `undo` would revert
    pub fn undo_description(&self) -> Option<String> {
        if self.can_undo() {
            Some(self.entries[self.cursor].description.clone())
        } else {
            None
        }
    }

    /// Description of the step `redo` would reapply
    pub fn redo_description(&self) -> Option<String> {
        self.entries.get(self.cursor + 1).map(|e| e.description.clone())
    }
}
