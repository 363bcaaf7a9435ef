//! Tool definitions for matrix editing

use serde::{Deserialize, Serialize};

/// Available editing tools
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Paint empty cells with the brush; select and move occupied cells
    #[default]
    Paint,
    /// Clear occupied cells
    Erase,
}

/// Pointer affordance for a hovered cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorHint {
    #[default]
    Default,
    /// Empty cell under the paint tool
    Paint,
    /// Erase tool
    Erase,
    /// Selected occupied cell, can be picked up
    Grab,
    /// Move drag in progress, drop allowed
    Grabbing,
    /// Move drag in progress, drop would collide
    NotAllowed,
}

/// Modifier keys held during a pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Ctrl (or Cmd): add to / remove from the selection instead of replacing it
    pub toggle: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { toggle: false };
    pub const TOGGLE: Modifiers = Modifiers { toggle: true };
}
