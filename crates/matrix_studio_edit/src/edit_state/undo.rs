use crate::{Result, UndoState};

use super::{InteractionState, MatrixEditState};

impl UndoState for MatrixEditState {
    fn undo_description(&self) -> Option<String> {
        self.history.undo_description()
    }

    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn undo(&mut self) -> Result<()> {
        self.interaction = InteractionState::Idle;
        if self.history.undo().is_some() {
            self.grid_changed();
        }
        Ok(())
    }

    fn redo_description(&self) -> Option<String> {
        self.history.redo_description()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn redo(&mut self) -> Result<()> {
        self.interaction = InteractionState::Idle;
        if self.history.redo().is_some() {
            self.grid_changed();
        }
        Ok(())
    }
}
