//! Matrix Edit State
//!
//! The session object for one editor instance. It owns everything that used
//! to be ambient UI state (active tool, brush, selection, gesture) next to the
//! grid history, so independent sessions never share anything.
//!
//! All grid writes go through [`MatrixEditState::commit`] (one history step)
//! or the stroke helpers in `interaction.rs` (one step per stroke). Each
//! committed change is reported through the `on_change` listener.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use crate::{
    Brush, Cell, Device, EditorOptions, Grid, GridHistory, GroupIndex, GroupIndexCache, PixelIncrementMode, Selection, Tool, find_device,
};

use super::InteractionState;

type GridListener = Box<dyn FnMut(&Grid)>;

/// Host supplied configuration. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatrixConfig {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub initial_data: Option<Vec<Vec<Cell>>>,
    pub device_list: Option<Vec<Device>>,
}

pub struct MatrixEditState {
    // ═══════════════════════════════════════════════════════════════════════
    // Grid Data
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) history: GridHistory,
    pub(crate) name: Option<String>,
    pub(crate) devices: Vec<Device>,
    pub(crate) is_dirty: bool,

    // ═══════════════════════════════════════════════════════════════════════
    // Editing State (not undoable)
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) tool: Tool,
    pub(crate) brush: Brush,
    pub(crate) pixel_increment: PixelIncrementMode,
    pub(crate) auto_group: bool,
    pub(crate) group_prefix: String,
    pub(crate) selection: Selection,
    pub(crate) interaction: InteractionState,

    // ═══════════════════════════════════════════════════════════════════════
    // Derived State
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) group_cache: RefCell<GroupIndexCache>,

    on_change: Option<GridListener>,
    on_save: Option<GridListener>,
}

impl Default for MatrixEditState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MatrixEditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixEditState")
            .field("size", &self.grid().size())
            .field("history_len", &self.history.len())
            .field("tool", &self.tool)
            .field("brush", &self.brush)
            .field("selection", &self.selection.len())
            .field("interaction", &self.interaction)
            .finish()
    }
}

impl MatrixEditState {
    // ═══════════════════════════════════════════════════════════════════════
    // Constructors
    // ═══════════════════════════════════════════════════════════════════════

    /// Create an empty 16x20 editor with default options
    pub fn new() -> Self {
        Self::with_options(&EditorOptions::default())
    }

    pub fn with_options(options: &EditorOptions) -> Self {
        Self::from_config(MatrixConfig::default(), options)
    }

    /// Create an editor from host configuration. The initial data is padded or
    /// truncated to the requested size and becomes the non-undoable baseline.
    pub fn from_config(config: MatrixConfig, options: &EditorOptions) -> Self {
        let rows = config.rows.unwrap_or(options.rows);
        let cols = config.cols.unwrap_or(options.cols);
        let grid = match &config.initial_data {
            Some(data) => Grid::from_data_fitted(data, rows, cols),
            None => Grid::new(rows, cols),
        };

        Self {
            history: GridHistory::new(grid, options.history_capacity),
            name: None,
            devices: config.device_list.unwrap_or_default(),
            is_dirty: false,
            tool: Tool::Paint,
            brush: options.brush.clone(),
            pixel_increment: options.pixel_increment,
            auto_group: options.auto_group,
            group_prefix: options.group_prefix.clone(),
            selection: Selection::new(),
            interaction: InteractionState::Idle,
            group_cache: RefCell::new(GroupIndexCache::new()),
            on_change: None,
            on_save: None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Getters
    // ═══════════════════════════════════════════════════════════════════════

    /// The committed grid
    pub fn grid(&self) -> &Grid {
        self.history.current()
    }

    pub fn rows(&self) -> usize {
        self.grid().rows()
    }

    pub fn cols(&self) -> usize {
        self.grid().cols()
    }

    pub fn history(&self) -> &GridHistory {
        &self.history
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        find_device(&self.devices, id)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn pixel_increment(&self) -> PixelIncrementMode {
        self.pixel_increment
    }

    pub fn auto_group(&self) -> bool {
        self.auto_group
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Group lookup for the committed grid, rebuilt only after grid changes
    pub fn group_index(&self) -> Arc<GroupIndex> {
        self.group_cache.borrow_mut().get(self.history.current())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Basic Setters (non-undoable editing state)
    // ═══════════════════════════════════════════════════════════════════════

    /// Switch tools. Any gesture in progress is finished first.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            self.pointer_leave();
            self.tool = tool;
        }
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    pub fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    pub fn set_pixel_increment(&mut self, mode: PixelIncrementMode) {
        self.pixel_increment = mode;
    }

    pub fn set_auto_group(&mut self, enabled: bool) {
        self.auto_group = enabled;
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Replace the device list. Existing cells are not touched; bindings to
    /// devices that disappeared simply become unbounded.
    pub fn set_devices(&mut self, devices: Vec<Device>) {
        self.devices = devices;
    }

    pub fn set_on_change(&mut self, listener: impl FnMut(&Grid) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    pub fn set_on_save(&mut self, listener: impl FnMut(&Grid) + 'static) {
        self.on_save = Some(Box::new(listener));
    }

    /// Report the full grid to the save listener
    pub fn save(&mut self) {
        if let Some(listener) = self.on_save.as_mut() {
            listener(self.history.current());
        }
        self.is_dirty = false;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Commit Helpers
    // ═══════════════════════════════════════════════════════════════════════

    /// Commit `grid` as one history step. Unchanged grids are ignored.
    pub(crate) fn commit(&mut self, grid: Grid, description: String) -> bool {
        if grid.ptr_eq(self.grid()) {
            return false;
        }
        self.history.push(grid, description);
        self.grid_changed();
        true
    }

    /// Replace the history with a single baseline entry
    pub(crate) fn reset_to(&mut self, grid: Grid) {
        self.interaction = InteractionState::Idle;
        self.selection.clear();
        self.history.reset(grid);
        self.is_dirty = false;
        self.notify_change();
    }

    pub(crate) fn grid_changed(&mut self) {
        self.is_dirty = true;
        self.selection.retain_occupied(self.history.current());
        self.notify_change();
    }

    fn notify_change(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            listener(self.history.current());
        }
    }
}
