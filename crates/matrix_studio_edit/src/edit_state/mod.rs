//! Editing state for LED matrix layouts
//!
//! This module provides the [`MatrixEditState`] session object: the committed
//! grid with its undo history, the device list, and the non-undoable editing
//! state (tool, brush, selection and the active pointer gesture).

mod batch;
mod derived;
mod interaction;
mod layout;
mod selection;
mod state;
mod undo;

pub use batch::{BatchEdit, CommonValue};
pub use derived::PixelState;
pub use interaction::InteractionState;
pub use state::{MatrixConfig, MatrixEditState};
