use crate::{CellIssue, Device, DropStatus, Position, validate_cells};

use super::{InteractionState, MatrixEditState};

/// Everything a renderer needs to draw one cell besides its data
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelState {
    pub selected: bool,
    /// The cell is being dragged away
    pub ghosted: bool,
    /// Drop destination status while dragging
    pub drop_preview: Option<DropStatus>,
    /// The pixel index does not fit the bound device
    pub invalid: bool,
}

impl MatrixEditState {
    pub fn pixel_state(&self, pos: Position) -> PixelState {
        let (ghosted, drop_preview) = match &self.interaction {
            InteractionState::Dragging { candidates, preview, .. } => (candidates.contains(&pos), preview.status_at(pos)),
            _ => (false, None),
        };
        let invalid = self
            .grid()
            .cell(pos)
            .is_some_and(|cell| cell.is_occupied() && cell.validate(&self.devices).is_err());
        PixelState {
            selected: self.selection.contains(pos),
            ghosted,
            drop_preview,
            invalid,
        }
    }

    /// Devices whose id starts with `prefix` (case insensitive)
    pub fn device_suggestions(&self, prefix: &str) -> Vec<&Device> {
        let prefix = prefix.to_lowercase();
        self.devices.iter().filter(|d| d.id.to_lowercase().starts_with(&prefix)).collect()
    }

    /// Occupied cells whose pixel index is invalid for their device
    pub fn validate_cells(&self) -> Vec<CellIssue> {
        validate_cells(self.grid(), &self.devices)
    }
}
