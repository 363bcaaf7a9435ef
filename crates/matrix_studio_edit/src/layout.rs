//! Layout file import/export
//!
//! The layout file is JSON:
//!
//! ```json
//! {
//!   "name": "optional",
//!   "matrixData": [[{ "deviceId": "dev-1", "pixel": 0, "group": "g1" }]],
//!   "deviceList": [{ "id": "dev-1", "count": 50 }]
//! }
//! ```
//!
//! Import validation only requires a non-empty `matrixData` array whose first
//! row is an array. Rows and columns are inferred from the first row; ragged
//! rows are padded/truncated to that width when converted to a grid.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Cell, Device, EditError, Grid, Position, Result};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub matrix_data: Vec<Vec<Cell>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_list: Option<Vec<Device>>,
}

impl LayoutFile {
    pub fn from_grid(name: Option<String>, grid: &Grid, devices: &[Device]) -> Self {
        Self {
            name,
            matrix_data: grid.to_rows(),
            device_list: Some(devices.to_vec()),
        }
    }

    /// Parse and validate a layout file
    pub fn parse(txt: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(txt)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Some(obj) = value.as_object() else {
            return Err(EditError::invalid_layout("expected a JSON object"));
        };
        let Some(matrix) = obj.get("matrixData") else {
            return Err(EditError::invalid_layout("missing 'matrixData'"));
        };
        let Some(rows) = matrix.as_array() else {
            return Err(EditError::invalid_layout("'matrixData' is not an array"));
        };
        let Some(first) = rows.first() else {
            return Err(EditError::invalid_layout("'matrixData' is empty"));
        };
        if !first.is_array() {
            return Err(EditError::invalid_layout("first row of 'matrixData' is not an array"));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)?;
        Self::parse(&txt)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Inferred row count
    pub fn rows(&self) -> usize {
        self.matrix_data.len()
    }

    /// Inferred column count (width of the first row)
    pub fn cols(&self) -> usize {
        self.matrix_data.first().map_or(0, Vec::len)
    }

    pub fn to_grid(&self) -> Grid {
        Grid::from_data_fitted(&self.matrix_data, self.rows(), self.cols())
    }
}

/// A cell whose pixel binding fails validation
#[derive(Debug)]
pub struct CellIssue {
    pub pos: Position,
    pub error: EditError,
}

/// List every occupied cell whose pixel index is invalid for its device
pub fn validate_cells(grid: &Grid, devices: &[Device]) -> Vec<CellIssue> {
    grid.occupied()
        .filter_map(|(pos, cell)| cell.validate(devices).err().map(|error| CellIssue { pos, error }))
        .collect()
}
