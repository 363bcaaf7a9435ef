//! Editing core for LED matrix layouts.
//!
//! A layout is a rectangular grid of [`Cell`]s, each binding a physical LED
//! (device id + pixel index) to a position, optionally tagged with a group.
//! [`MatrixEditState`] wraps the grid with undo history, selection, brushes
//! and the pointer state machine used for painting, erasing and moving cells.

mod brush;
mod cell;
mod edit_state;
mod error;
mod grid;
mod group_index;
mod history;
mod layout;
pub mod move_validator;
mod options;
mod position;
mod selection;
mod tools;

pub use brush::{Brush, PixelIncrementMode};
pub use cell::{Cell, Device, find_device};
pub use edit_state::{BatchEdit, CommonValue, InteractionState, MatrixConfig, MatrixEditState, PixelState};
pub use error::{EditError, Result};
pub use grid::Grid;
pub use group_index::{GroupIndex, GroupIndexCache};
pub use history::{DEFAULT_HISTORY_CAPACITY, GridHistory, UndoState};
pub use layout::{CellIssue, LayoutFile, validate_cells};
pub use move_validator::{DropPreview, DropStatus, MovePreview};
pub use options::{DEFAULT_COLS, DEFAULT_ROWS, EditorOptions};
pub use position::Position;
pub use selection::Selection;
pub use tools::{CursorHint, Modifiers, Tool};

use i18n_embed::{
    DesktopLanguageRequester,
    fluent::{FluentLanguageLoader, fluent_language_loader},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "i18n"] // path to the compiled localization resources
struct Localizations;

use once_cell::sync::Lazy;
pub static LANGUAGE_LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let loader = fluent_language_loader!();
    let requested_languages = DesktopLanguageRequester::requested_languages();
    let _result = i18n_embed::select(&loader, &Localizations, &requested_languages);
    loader.set_use_isolating(false);
    loader
});
