use crate::{Position, Selection};

use super::MatrixEditState;

impl MatrixEditState {
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replace the selection. Empty or out of range positions are dropped.
    pub fn set_selection(&mut self, positions: impl IntoIterator<Item = Position>) {
        let grid = self.history.current();
        self.selection = positions.into_iter().filter(|&pos| grid.is_occupied(pos)).collect();
    }

    pub fn select_all_occupied(&mut self) {
        self.selection = self.grid().occupied().map(|(pos, _)| pos).collect();
    }

    /// Select every cell of `group`. Returns false if no cell carries it.
    pub fn select_group(&mut self, group: &str) -> bool {
        let index = self.group_index();
        let members = index.members(group);
        if members.is_empty() {
            return false;
        }
        self.selection = members.iter().copied().collect::<Selection>();
        true
    }
}
