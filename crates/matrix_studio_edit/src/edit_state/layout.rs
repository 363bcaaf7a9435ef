//! Whole-grid replacement: resize, reconfigure, layout import and export.
//!
//! All of these reset the history to a single baseline entry and clear the
//! selection. None of them can be undone.

use std::path::Path;

use crate::{EditError, EditorOptions, Grid, LayoutFile, Result};

use super::{MatrixConfig, MatrixEditState};

impl MatrixEditState {
    pub fn from_layout(layout: &LayoutFile, options: &EditorOptions) -> Self {
        let mut state = Self::with_options(options);
        state.apply_layout(layout);
        state
    }

    /// Resize the grid, keeping the overlapping region
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        if rows == 0 || cols == 0 {
            return Err(EditError::InvalidSize { rows, cols });
        }
        if (rows, cols) == self.grid().size() {
            return Ok(());
        }
        log::info!("resize {}x{} -> {rows}x{cols}", self.rows(), self.cols());
        let grid = self.grid().resize(rows, cols);
        self.reset_to(grid);
        Ok(())
    }

    /// Replace the grid with an empty one
    pub fn load_empty(&mut self, rows: usize, cols: usize) -> Result<()> {
        if rows == 0 || cols == 0 {
            return Err(EditError::InvalidSize { rows, cols });
        }
        self.name = None;
        self.reset_to(Grid::new(rows, cols));
        Ok(())
    }

    /// Apply new host configuration.
    ///
    /// Supplied data replaces the grid (fitted to the requested size, or to the
    /// data's own size). Otherwise only the dimensions change, keeping the
    /// overlapping cells. A new device list replaces the old one. A zero sized
    /// result is rejected and leaves the state untouched.
    pub fn reconfigure(&mut self, config: MatrixConfig) -> Result<()> {
        let (rows, cols) = match &config.initial_data {
            Some(data) => (
                config.rows.unwrap_or(data.len()),
                config.cols.unwrap_or_else(|| data.first().map_or(0, Vec::len)),
            ),
            None => (config.rows.unwrap_or(self.rows()), config.cols.unwrap_or(self.cols())),
        };
        if rows == 0 || cols == 0 {
            return Err(EditError::InvalidSize { rows, cols });
        }

        if let Some(devices) = config.device_list {
            self.devices = devices;
        }
        let grid = match &config.initial_data {
            Some(data) => Grid::from_data_fitted(data, rows, cols),
            None if (rows, cols) == self.grid().size() => return Ok(()),
            None => self.grid().resize(rows, cols),
        };
        self.reset_to(grid);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Layout Files
    // ═══════════════════════════════════════════════════════════════════════

    /// Replace the grid with `layout`. Dimensions come from the layout; its
    /// device list (if any) replaces the current one.
    pub fn apply_layout(&mut self, layout: &LayoutFile) {
        log::info!("import layout {}x{}", layout.rows(), layout.cols());
        if let Some(devices) = &layout.device_list {
            self.devices = devices.clone();
        }
        self.name = layout.name.clone();
        self.reset_to(layout.to_grid());
    }

    /// Parse and apply a layout. Invalid input leaves the state untouched.
    pub fn import_json(&mut self, txt: &str) -> Result<()> {
        match LayoutFile::parse(txt) {
            Ok(layout) => {
                self.apply_layout(&layout);
                Ok(())
            }
            Err(err) => {
                log::warn!("layout import rejected: {err}");
                Err(err)
            }
        }
    }

    pub fn import_file(&mut self, path: &Path) -> Result<()> {
        let txt = std::fs::read_to_string(path)?;
        self.import_json(&txt)
    }

    pub fn export_layout(&self) -> LayoutFile {
        LayoutFile::from_grid(self.name.clone(), self.grid(), &self.devices)
    }

    pub fn export_json(&self) -> Result<String> {
        self.export_layout().to_json_pretty()
    }

    pub fn export_file(&mut self, path: &Path) -> Result<()> {
        self.export_layout().save(path)?;
        self.is_dirty = false;
        Ok(())
    }
}
