//! Brush descriptor used for painting
//!
//! The brush is editing state, not grid data: changing it is never undoable.

use serde::{Deserialize, Serialize};

use crate::{Cell, Device, EditError, Result};

/// How the brush pixel index changes after each painted cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelIncrementMode {
    #[default]
    Increment,
    Decrement,
    Off,
}

impl PixelIncrementMode {
    pub fn step(self) -> i32 {
        match self {
            PixelIncrementMode::Increment => 1,
            PixelIncrementMode::Decrement => -1,
            PixelIncrementMode::Off => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(default)]
    pub pixel: i32,
    #[serde(default)]
    pub group: String,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            device_id: "paint-brush".to_string(),
            pixel: 0,
            group: "group-1".to_string(),
        }
    }
}

impl Brush {
    pub fn new(device_id: impl Into<String>, pixel: i32, group: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            pixel,
            group: group.into(),
        }
    }

    /// The cell a paint action writes
    pub fn to_cell(&self) -> Cell {
        Cell::new(self.device_id.clone(), self.pixel, self.group.clone())
    }

    /// Check the cell this brush would paint, with the same rules as a
    /// single cell edit. A brush without a device cannot paint.
    pub fn check(&self, devices: &[Device]) -> Result<()> {
        if self.device_id.is_empty() {
            return Err(EditError::EmptyDevice);
        }
        self.to_cell().validate(devices)
    }

    pub fn advance(&mut self, mode: PixelIncrementMode) {
        self.pixel = self.pixel.saturating_add(mode.step());
    }
}
