//! Single cell and selection-wide edits
//!
//! Every operation here is one history step. Rejected edits leave the grid
//! and history untouched.

use i18n_embed_fl::fl;

use crate::{Cell, EditError, Position, Result, find_device};

use super::MatrixEditState;

/// Aggregate of one field across the selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommonValue<T> {
    /// Nothing selected
    None,
    /// Every selected cell has this value
    Same(T),
    /// Selected cells differ
    Mixed,
}

impl<T> CommonValue<T> {
    pub fn is_mixed(&self) -> bool {
        matches!(self, CommonValue::Mixed)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            CommonValue::Same(v) => Some(v),
            _ => None,
        }
    }
}

/// Selection-wide edit. Only fields that are `Some` are written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchEdit {
    pub device_id: Option<String>,
    /// Renumber the selection in row-major order starting here
    pub pixel_start: Option<i32>,
    pub group: Option<String>,
}

impl BatchEdit {
    pub fn is_empty(&self) -> bool {
        self.device_id.is_none() && self.pixel_start.is_none() && self.group.is_none()
    }

    fn description(&self) -> String {
        match (&self.device_id, self.pixel_start, &self.group) {
            (Some(_), None, None) => fl!(crate::LANGUAGE_LOADER, "undo-set-device"),
            (None, Some(_), None) => fl!(crate::LANGUAGE_LOADER, "undo-renumber"),
            (None, None, Some(_)) => fl!(crate::LANGUAGE_LOADER, "undo-set-group"),
            _ => fl!(crate::LANGUAGE_LOADER, "undo-edit-cell"),
        }
    }
}

impl MatrixEditState {
    // ═══════════════════════════════════════════════════════════════════════
    // Single Cell
    // ═══════════════════════════════════════════════════════════════════════

    /// Overwrite one cell. The pixel index is checked against the bound device.
    pub fn set_cell_data(&mut self, pos: Position, cell: Cell) -> Result<()> {
        let checked = if cell.is_occupied() { cell.validate(&self.devices) } else { Ok(()) };
        if let Err(err) = checked {
            log::warn!("edit of {pos} rejected: {err}");
            return Err(err);
        }
        let grid = self.grid().set_cell(pos, cell)?;
        self.commit(grid, fl!(crate::LANGUAGE_LOADER, "undo-edit-cell"));
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Selection Batch
    // ═══════════════════════════════════════════════════════════════════════

    /// Apply `edit` to every selected cell as one history step.
    ///
    /// Renumbering assigns `start, start + 1, ...` in row-major order of the
    /// selected positions and is rejected as a whole if any assigned index is
    /// outside its device's range.
    pub fn apply_batch_edit(&mut self, edit: &BatchEdit) -> Result<()> {
        if edit.is_empty() || self.selection.is_empty() {
            return Ok(());
        }
        if let Some(start) = edit.pixel_start.filter(|start| *start < 0) {
            return Err(EditError::NegativePixel { pixel: start });
        }

        let grid = self.grid();
        let mut changes = Vec::with_capacity(self.selection.len());
        for (i, pos) in self.selection.iter().enumerate() {
            let mut cell = grid.get(pos)?.clone();
            if let Some(device_id) = &edit.device_id {
                cell.device_id = device_id.clone();
            }
            if let Some(start) = edit.pixel_start {
                cell.pixel = start.saturating_add(i as i32);
                if let Some(device) = find_device(&self.devices, &cell.device_id) {
                    device.check_pixel(cell.pixel)?;
                }
            }
            if let Some(group) = &edit.group {
                cell.group = group.clone();
            }
            changes.push((pos, cell));
        }

        let grid = grid.set_cells(changes)?;
        self.commit(grid, edit.description());
        Ok(())
    }

    pub fn set_selection_device(&mut self, device_id: impl Into<String>) -> Result<()> {
        self.apply_batch_edit(&BatchEdit {
            device_id: Some(device_id.into()),
            ..Default::default()
        })
    }

    pub fn set_selection_group(&mut self, group: impl Into<String>) -> Result<()> {
        self.apply_batch_edit(&BatchEdit {
            group: Some(group.into()),
            ..Default::default()
        })
    }

    pub fn renumber_selection(&mut self, start: i32) -> Result<()> {
        self.apply_batch_edit(&BatchEdit {
            pixel_start: Some(start),
            ..Default::default()
        })
    }

    /// Clear every selected cell
    pub fn delete_selection(&mut self) -> Result<()> {
        if self.selection.is_empty() {
            return Ok(());
        }
        let grid = self.grid().set_cells(self.selection.iter().map(|pos| (pos, Cell::empty())))?;
        self.selection.clear();
        self.commit(grid, fl!(crate::LANGUAGE_LOADER, "undo-delete-selection"));
        Ok(())
    }

    /// Relabel every cell of group `old` as `new`. Returns the number of cells changed.
    pub fn rename_group(&mut self, old: &str, new: &str) -> Result<usize> {
        if old == new {
            return Ok(0);
        }
        let index = self.group_index();
        let members = index.members(old);
        if members.is_empty() {
            return Ok(0);
        }
        let grid = self.grid();
        let mut changes = Vec::with_capacity(members.len());
        for &pos in members {
            let mut cell = grid.get(pos)?.clone();
            cell.group = new.to_string();
            changes.push((pos, cell));
        }
        let grid = grid.set_cells(changes)?;
        self.commit(grid, fl!(crate::LANGUAGE_LOADER, "undo-rename-group"));
        if self.brush.group == old {
            self.brush.group = new.to_string();
        }
        Ok(members.len())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Aggregates
    // ═══════════════════════════════════════════════════════════════════════

    fn common_value<T: PartialEq>(&self, field: impl Fn(&Cell) -> T) -> CommonValue<T> {
        let grid = self.grid();
        let mut values = self.selection.iter().filter_map(|pos| grid.cell(pos)).map(field);
        let Some(first) = values.next() else {
            return CommonValue::None;
        };
        if values.all(|v| v == first) {
            CommonValue::Same(first)
        } else {
            CommonValue::Mixed
        }
    }

    pub fn common_device_id(&self) -> CommonValue<String> {
        self.common_value(|c| c.device_id.clone())
    }

    pub fn common_pixel(&self) -> CommonValue<i32> {
        self.common_value(|c| c.pixel)
    }

    pub fn common_group(&self) -> CommonValue<String> {
        self.common_value(|c| c.group.clone())
    }
}
