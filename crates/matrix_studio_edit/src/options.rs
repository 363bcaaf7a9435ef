use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Brush, DEFAULT_HISTORY_CAPACITY, PixelIncrementMode, Result};

pub const DEFAULT_ROWS: usize = 16;
pub const DEFAULT_COLS: usize = 20;

/// Editor defaults, usually read from `options.toml`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EditorOptions {
    pub rows: usize,
    pub cols: usize,

    /// Number of grid snapshots kept for undo
    pub history_capacity: usize,

    pub pixel_increment: PixelIncrementMode,

    /// Tag every cell of a paint stroke with a fresh group on release
    pub auto_group: bool,

    /// Prefix for generated group names
    pub group_prefix: String,

    pub brush: Brush,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            pixel_increment: PixelIncrementMode::Increment,
            auto_group: false,
            group_prefix: "group-".to_string(),
            brush: Brush::default(),
        }
    }
}

impl EditorOptions {
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        let mut options: EditorOptions = toml::from_str(txt)?;
        options.history_capacity = options.history_capacity.max(1);
        Ok(options)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)?;
        Self::from_toml_str(&txt)
    }

    pub fn store(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
