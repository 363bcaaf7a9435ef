//! Pointer interaction state machine
//!
//! ```text
//! Idle ──down(paint, empty)──────────▶ Stroke(paint) ──up/leave──▶ Idle
//! Idle ──down(erase)─────────────────▶ Stroke(erase) ──up/leave──▶ Idle
//! Idle ──down(paint, selected cell)──▶ PreparingMove ──up────────▶ Idle (selection click)
//!                                        │ move(primary held)
//!                                        ▼
//!                                     Dragging ──up(no collision)──▶ Idle (move committed)
//!                                              ──up(collision)/leave──▶ Idle (discarded)
//! ```
//!
//! A paint or erase stroke becomes one history step: the first write pushes
//! an entry, every later write (and the auto-group relabel on release) amends
//! it. If another edit is committed mid-stroke, the stroke's next write starts
//! a fresh step instead of folding into that edit. Drag previews are never
//! committed.

use i18n_embed_fl::fl;

use crate::{Cell, CursorHint, Grid, Modifiers, MovePreview, Position, Selection, Tool, move_validator};

use super::MatrixEditState;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,

    /// Primary button held with paint or erase
    Stroke {
        tool: Tool,
        /// Cells written by this stroke, in order
        touched: Vec<Position>,
        /// The pointer moved with the button held
        moved: bool,
        /// History entry written by this stroke
        entry: Option<u64>,
    },

    /// Pressed on a selected cell, waiting to see if a drag starts
    PreparingMove { anchor: Position, candidates: Vec<Position> },

    /// Moving the captured cells
    Dragging {
        candidates: Vec<Position>,
        anchor: Position,
        preview: MovePreview,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging { .. })
    }

    /// Cells captured for a move (pending or in progress)
    pub fn candidates(&self) -> &[Position] {
        match self {
            InteractionState::PreparingMove { candidates, .. } | InteractionState::Dragging { candidates, .. } => candidates,
            _ => &[],
        }
    }

    pub fn preview(&self) -> Option<&MovePreview> {
        match self {
            InteractionState::Dragging { preview, .. } => Some(preview),
            _ => None,
        }
    }

    pub fn collision(&self) -> bool {
        self.preview().is_some_and(|p| p.collision)
    }
}

impl MatrixEditState {
    // ═══════════════════════════════════════════════════════════════════════
    // Pointer Events
    // ═══════════════════════════════════════════════════════════════════════

    /// Primary button pressed on `pos`
    pub fn pointer_down(&mut self, pos: Position) {
        if !self.check_event_pos(pos) {
            return;
        }
        if !self.interaction.is_idle() {
            // a release was missed (pointer left the host window)
            self.pointer_leave();
        }

        let occupied = self.grid().is_occupied(pos);
        match self.tool {
            Tool::Paint => {
                if occupied {
                    if self.selection.contains(pos) {
                        self.interaction = InteractionState::PreparingMove {
                            anchor: pos,
                            candidates: self.selection.to_vec(),
                        };
                    }
                } else {
                    self.begin_stroke(Tool::Paint);
                    self.paint_at(pos);
                }
            }
            Tool::Erase => {
                self.begin_stroke(Tool::Erase);
                if occupied {
                    self.erase_at(pos);
                }
            }
        }
    }

    /// Pointer entered the cell at `pos`
    pub fn pointer_enter(&mut self, pos: Position) {
        if !self.check_event_pos(pos) {
            return;
        }
        match &self.interaction {
            InteractionState::Stroke { tool: Tool::Paint, .. } => {
                if !self.grid().is_occupied(pos) {
                    self.paint_at(pos);
                }
            }
            InteractionState::Stroke { tool: Tool::Erase, .. } => {
                if self.grid().is_occupied(pos) {
                    self.erase_at(pos);
                }
            }
            InteractionState::Dragging { .. } => self.update_drag_preview(pos),
            _ => {}
        }
    }

    /// Pointer moved; `primary_held` reports the primary button state
    pub fn pointer_move(&mut self, primary_held: bool) {
        if !primary_held {
            return;
        }
        match &mut self.interaction {
            InteractionState::PreparingMove { anchor, candidates } => {
                let anchor = *anchor;
                let candidates = std::mem::take(candidates);
                log::debug!("start moving {} cell(s) from {anchor}", candidates.len());
                self.interaction = InteractionState::Dragging {
                    candidates,
                    anchor,
                    preview: MovePreview::default(),
                };
            }
            InteractionState::Stroke { moved, .. } => *moved = true,
            _ => {}
        }
    }

    /// Primary button released over `pos`, or outside the grid when `None`
    pub fn pointer_up(&mut self, pos: Option<Position>, modifiers: Modifiers) {
        let pos = pos.filter(|&p| self.check_event_pos(p));
        match std::mem::take(&mut self.interaction) {
            InteractionState::Idle => {
                if let Some(pos) = pos {
                    self.selection_click(pos, modifiers);
                }
            }
            InteractionState::Stroke { tool, touched, moved, entry } => {
                log::debug!("{tool:?} stroke ended after {} cell(s)", touched.len());
                if tool == Tool::Paint && self.auto_group {
                    self.auto_group_stroke(&touched, entry);
                }
                if let (false, Some(pos)) = (moved, pos) {
                    self.selection_click(pos, modifiers);
                }
            }
            InteractionState::PreparingMove { .. } => {
                if let Some(pos) = pos {
                    self.selection_click(pos, modifiers);
                }
            }
            InteractionState::Dragging { candidates, anchor, .. } => match pos {
                Some(pos) => self.drop_move(&candidates, pos.delta_from(anchor)),
                None => log::debug!("move released outside the grid, discarded"),
            },
        }
    }

    /// Pointer left the grid. Strokes end normally, moves are discarded.
    pub fn pointer_leave(&mut self) {
        if !self.interaction.is_idle() {
            self.pointer_up(None, Modifiers::NONE);
        }
    }

    /// Select every member of the double clicked cell's group
    pub fn double_click(&mut self, pos: Position) {
        if !self.check_event_pos(pos) || self.tool != Tool::Paint {
            return;
        }
        let Some(cell) = self.grid().cell(pos) else {
            return;
        };
        if !cell.is_occupied() || !cell.has_group() {
            return;
        }
        let group = cell.group.clone();
        let index = self.group_index();
        self.selection = index.members(&group).iter().copied().collect();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Stroke Handling
    // ═══════════════════════════════════════════════════════════════════════

    fn begin_stroke(&mut self, tool: Tool) {
        self.interaction = InteractionState::Stroke {
            tool,
            touched: Vec::new(),
            moved: false,
            entry: None,
        };
    }

    fn paint_at(&mut self, pos: Position) {
        if let Err(err) = self.brush.check(&self.devices) {
            log::warn!("paint at {pos} rejected: {err}");
            return;
        }
        match self.grid().set_cell(pos, self.brush.to_cell()) {
            Ok(grid) => {
                self.stroke_write(grid, pos);
                self.brush.advance(self.pixel_increment);
            }
            Err(err) => log::warn!("paint at {pos} failed: {err}"),
        }
    }

    fn erase_at(&mut self, pos: Position) {
        match self.grid().set_cell(pos, Cell::empty()) {
            Ok(grid) => self.stroke_write(grid, pos),
            Err(err) => log::warn!("erase at {pos} failed: {err}"),
        }
    }

    /// Record a stroke write. It amends the stroke's own entry while that is
    /// still the current one, otherwise it pushes a new entry.
    fn stroke_write(&mut self, grid: Grid, pos: Position) {
        let current = self.history.current_id();
        let (tool, owned) = match &mut self.interaction {
            InteractionState::Stroke { tool, touched, entry, .. } => {
                touched.push(pos);
                (*tool, *entry == Some(current))
            }
            _ => (self.tool, false),
        };
        if owned {
            self.history.amend(grid);
        } else {
            let id = self.history.push(grid, Self::stroke_description(tool));
            if let InteractionState::Stroke { entry, .. } = &mut self.interaction {
                *entry = Some(id);
            }
        }
        self.grid_changed();
    }

    fn stroke_description(tool: Tool) -> String {
        match tool {
            Tool::Paint => fl!(crate::LANGUAGE_LOADER, "undo-paint"),
            Tool::Erase => fl!(crate::LANGUAGE_LOADER, "undo-erase"),
        }
    }

    /// Tag every cell painted by the stroke with a fresh group and make that
    /// group the brush group. The relabel is part of the stroke's history step.
    fn auto_group_stroke(&mut self, touched: &[Position], entry: Option<u64>) {
        if touched.is_empty() {
            return;
        }
        let name = self.group_index().next_free_name(&self.group_prefix, 1);
        let grid = self.grid();
        let changes: Vec<(Position, Cell)> = touched
            .iter()
            .filter_map(|&pos| grid.cell(pos).filter(|c| c.is_occupied()).map(|c| (pos, c)))
            .map(|(pos, cell)| {
                let mut cell = cell.clone();
                cell.group = name.clone();
                (pos, cell)
            })
            .collect();

        match grid.set_cells(changes) {
            Ok(grid) => {
                log::debug!("auto group '{name}' for {} cell(s)", touched.len());
                if entry == Some(self.history.current_id()) {
                    self.history.amend(grid);
                } else {
                    self.history.push(grid, Self::stroke_description(Tool::Paint));
                }
                self.grid_changed();
                self.brush.group = name;
            }
            Err(err) => log::warn!("auto group failed: {err}"),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Move Handling
    // ═══════════════════════════════════════════════════════════════════════

    fn update_drag_preview(&mut self, pos: Position) {
        let grid = self.history.current().clone();
        if let InteractionState::Dragging { candidates, anchor, preview } = &mut self.interaction {
            *preview = move_validator::validate_move(&grid, candidates, pos.delta_from(*anchor));
        }
    }

    fn drop_move(&mut self, candidates: &[Position], delta: (i32, i32)) {
        if delta == (0, 0) {
            return;
        }
        match move_validator::apply_move(self.grid(), candidates, delta) {
            Ok(Some(grid)) => {
                let description = fl!(crate::LANGUAGE_LOADER, "undo-move-cells", count = (candidates.len() as i64));
                self.history.push(grid, description);
                self.selection = candidates.iter().map(|p| p.offset(delta)).collect();
                self.grid_changed();
            }
            Ok(None) => log::debug!("move by {delta:?} collides, discarded"),
            Err(err) => log::warn!("move by {delta:?} failed: {err}"),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Selection Click
    // ═══════════════════════════════════════════════════════════════════════

    /// Click on an occupied cell with the paint tool.
    ///
    /// With the toggle modifier the cell is added or removed. Without it the
    /// selection becomes just that cell, or is cleared when that cell already
    /// was the only selected one.
    fn selection_click(&mut self, pos: Position, modifiers: Modifiers) {
        if self.tool != Tool::Paint || !self.grid().is_occupied(pos) {
            return;
        }
        if modifiers.toggle {
            self.selection.toggle(pos);
        } else if self.selection.len() == 1 && self.selection.contains(pos) {
            self.selection.clear();
        } else {
            self.selection = Selection::single(pos);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Hover Feedback
    // ═══════════════════════════════════════════════════════════════════════

    /// Pointer affordance for the hovered cell
    pub fn cursor_hint(&self, pos: Position) -> CursorHint {
        if self.interaction.is_dragging() {
            return if self.interaction.collision() {
                CursorHint::NotAllowed
            } else {
                CursorHint::Grabbing
            };
        }
        match self.tool {
            Tool::Erase => CursorHint::Erase,
            Tool::Paint => {
                if !self.grid().is_occupied(pos) {
                    CursorHint::Paint
                } else if self.selection.contains(pos) {
                    CursorHint::Grab
                } else {
                    CursorHint::Default
                }
            }
        }
    }

    /// Overlay label while a gesture is active
    pub fn drag_label(&self) -> Option<String> {
        match &self.interaction {
            InteractionState::Dragging { candidates, .. } => Some(fl!(crate::LANGUAGE_LOADER, "drag-label-pixels", count = (candidates.len() as i64))),
            InteractionState::Stroke { tool: Tool::Paint, moved: true, .. } => Some(fl!(crate::LANGUAGE_LOADER, "drag-label-painting")),
            _ => None,
        }
    }

    /// Events must address a cell inside the grid
    fn check_event_pos(&self, pos: Position) -> bool {
        let inside = self.grid().contains(pos);
        debug_assert!(inside, "pointer event outside the grid: {pos}");
        if !inside {
            log::warn!("ignoring pointer event outside the grid: {pos}");
        }
        inside
    }
}
