//! Unified error types for matrix_studio_edit

use thiserror::Error;

/// Main error type for matrix editing operations
#[derive(Debug, Error)]
pub enum EditError {
    // === Bounds Errors ===
    #[error("Cell ({row}, {col}) out of range ({rows}x{cols})")]
    OutOfRange { row: i32, col: i32, rows: usize, cols: usize },

    #[error("Invalid grid size {rows}x{cols}")]
    InvalidSize { rows: usize, cols: usize },

    // === Validation Errors ===
    #[error("Grid is not rectangular: row {row} has {actual} cells, expected {expected}")]
    NotRectangular { row: usize, expected: usize, actual: usize },

    #[error("Invalid layout: {message}")]
    InvalidLayout { message: String },

    #[error("Pixel {pixel} out of range for device '{device_id}' (0..{pixel_count})")]
    PixelOutOfRange { device_id: String, pixel: i32, pixel_count: i32 },

    #[error("Negative pixel index {pixel}")]
    NegativePixel { pixel: i32 },

    #[error("No device selected")]
    EmptyDevice,

    // === External Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Options parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Options write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type alias for matrix editing operations
pub type Result<T> = std::result::Result<T, EditError>;

impl EditError {
    /// Create an invalid layout error
    pub fn invalid_layout(msg: impl Into<String>) -> Self {
        Self::InvalidLayout { message: msg.into() }
    }

    /// True for errors the user can fix by editing input (import file, pixel value)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotRectangular { .. } | Self::InvalidLayout { .. } | Self::PixelOutOfRange { .. } | Self::NegativePixel { .. } | Self::EmptyDevice | Self::Json(_)
        )
    }
}
