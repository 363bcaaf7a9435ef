//! Interaction state machine tests
//!
//! Drives the editor through pointer events the way a grid widget would.

use matrix_studio_edit::{
    Brush, Cell, CursorHint, Device, DropStatus, InteractionState, MatrixEditState, Modifiers, PixelIncrementMode, Position, Tool, UndoState,
};
use pretty_assertions::assert_eq;

fn pos(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

/// Editor with the given cells occupied, history reset to that baseline
fn state_with(cells: &[(Position, Cell)]) -> MatrixEditState {
    let mut state = MatrixEditState::new();
    for (p, c) in cells {
        state.set_cell_data(*p, c.clone()).unwrap();
    }
    state.resize(8, 8).unwrap();
    state
}

fn click(state: &mut MatrixEditState, p: Position, modifiers: Modifiers) {
    state.pointer_down(p);
    state.pointer_up(Some(p), modifiers);
}

fn drag(state: &mut MatrixEditState, from: Position, path: &[Position]) {
    state.pointer_down(from);
    state.pointer_move(true);
    for p in path {
        state.pointer_enter(*p);
    }
}

// ============================================================================
// Painting
// ============================================================================

#[test]
fn test_paint_stroke_increments_pixel() {
    let mut state = MatrixEditState::new();
    state.set_brush(Brush::new("strip", 10, "g"));
    drag(&mut state, pos(0, 0), &[pos(0, 1), pos(1, 1)]);
    state.pointer_up(Some(pos(1, 1)), Modifiers::NONE);

    assert_eq!(state.grid().cell(pos(0, 0)), Some(&Cell::new("strip", 10, "g")));
    assert_eq!(state.grid().cell(pos(0, 1)), Some(&Cell::new("strip", 11, "g")));
    assert_eq!(state.grid().cell(pos(1, 1)), Some(&Cell::new("strip", 12, "g")));
    assert_eq!(state.brush().pixel, 13);
}

#[test]
fn test_paint_decrement_and_off() {
    let mut state = MatrixEditState::new();
    state.set_brush(Brush::new("strip", 5, ""));
    state.set_pixel_increment(PixelIncrementMode::Decrement);
    drag(&mut state, pos(0, 0), &[pos(0, 1)]);
    state.pointer_up(None, Modifiers::NONE);
    assert_eq!(state.grid().cell(pos(0, 1)).unwrap().pixel, 4);

    state.set_pixel_increment(PixelIncrementMode::Off);
    drag(&mut state, pos(2, 0), &[pos(2, 1)]);
    state.pointer_up(None, Modifiers::NONE);
    assert_eq!(state.grid().cell(pos(2, 0)).unwrap().pixel, 3);
    assert_eq!(state.grid().cell(pos(2, 1)).unwrap().pixel, 3);
}

#[test]
fn test_paint_over_occupied_cell_is_noop() {
    let mut state = state_with(&[(pos(0, 1), Cell::new("other", 7, ""))]);
    state.set_brush(Brush::new("strip", 0, ""));
    drag(&mut state, pos(0, 0), &[pos(0, 1), pos(0, 2)]);
    state.pointer_up(None, Modifiers::NONE);

    assert_eq!(state.grid().cell(pos(0, 1)), Some(&Cell::new("other", 7, "")));
    assert_eq!(state.grid().cell(pos(0, 2)).unwrap().pixel, 1);
    assert_eq!(state.brush().pixel, 2);
}

#[test]
fn test_paint_rejected_outside_device_range() {
    let mut state = MatrixEditState::new();
    state.set_devices(vec![Device::new("strip", 2)]);
    state.set_brush(Brush::new("strip", 1, ""));
    drag(&mut state, pos(0, 0), &[pos(0, 1), pos(0, 2)]);
    state.pointer_up(None, Modifiers::NONE);

    assert_eq!(state.grid().occupied_count(), 1);
    assert_eq!(state.brush().pixel, 2);
    assert_eq!(state.history().len(), 2);
}

#[test]
fn test_auto_group_tags_stroke() {
    let mut state = MatrixEditState::new();
    state.set_auto_group(true);
    drag(&mut state, pos(0, 0), &[pos(0, 1)]);
    state.pointer_up(Some(pos(0, 1)), Modifiers::NONE);

    // the brush group "group-1" is taken by the stroke itself
    assert_eq!(state.grid().cell(pos(0, 0)).unwrap().group, "group-2");
    assert_eq!(state.grid().cell(pos(0, 1)).unwrap().group, "group-2");
    assert_eq!(state.brush().group, "group-2");
    assert_eq!(state.history().len(), 2);

    drag(&mut state, pos(3, 0), &[pos(3, 1)]);
    state.pointer_up(None, Modifiers::NONE);
    assert_eq!(state.grid().cell(pos(3, 0)).unwrap().group, "group-3");
    assert_eq!(state.grid().cell(pos(0, 0)).unwrap().group, "group-2");

    state.undo().unwrap();
    assert!(!state.grid().is_occupied(pos(3, 0)));
    assert_eq!(state.grid().occupied_count(), 2);
}

#[test]
fn test_paint_decrement_stops_at_zero() {
    let mut state = MatrixEditState::new();
    state.set_brush(Brush::new("unknown-strip", 0, ""));
    state.set_pixel_increment(PixelIncrementMode::Decrement);
    drag(&mut state, pos(0, 0), &[pos(0, 1), pos(0, 2)]);
    state.pointer_up(None, Modifiers::NONE);

    assert_eq!(state.grid().cell(pos(0, 0)), Some(&Cell::new("unknown-strip", 0, "")));
    assert!(!state.grid().is_occupied(pos(0, 1)));
    assert!(!state.grid().is_occupied(pos(0, 2)));
    assert_eq!(state.brush().pixel, -1);
    assert!(state.validate_cells().is_empty());
    // a single cell edit rejects the same value
    assert!(state.set_cell_data(pos(0, 1), state.brush().to_cell()).is_err());
}

#[test]
fn test_paint_without_device_writes_nothing() {
    let mut state = MatrixEditState::new();
    state.set_brush(Brush::new("", 3, "g"));
    drag(&mut state, pos(0, 0), &[pos(0, 1)]);
    state.pointer_up(Some(pos(0, 1)), Modifiers::NONE);

    assert_eq!(state.grid().occupied_count(), 0);
    assert_eq!(state.history().len(), 1);
    assert_eq!(state.brush().pixel, 3);
}

#[test]
fn test_edit_during_stroke_keeps_its_own_step() {
    let mut state = MatrixEditState::new();
    state.set_brush(Brush::new("strip", 0, ""));
    state.pointer_down(pos(0, 0));
    state.pointer_move(true);
    state.set_cell_data(pos(5, 5), Cell::new("other", 1, "")).unwrap();
    state.pointer_enter(pos(0, 1));
    state.pointer_up(Some(pos(0, 1)), Modifiers::NONE);

    assert_eq!(state.history().len(), 4);
    assert_eq!(state.undo_description(), Some("Paint".to_string()));

    state.undo().unwrap();
    assert!(!state.grid().is_occupied(pos(0, 1)));
    assert!(state.grid().is_occupied(pos(5, 5)));
    assert!(state.grid().is_occupied(pos(0, 0)));

    state.undo().unwrap();
    assert!(!state.grid().is_occupied(pos(5, 5)));
    assert!(state.grid().is_occupied(pos(0, 0)));
}

#[test]
fn test_auto_group_after_edit_during_stroke() {
    let mut state = MatrixEditState::new();
    state.set_auto_group(true);
    state.pointer_down(pos(0, 0));
    state.set_cell_data(pos(5, 5), Cell::new("other", 1, "keep")).unwrap();
    state.pointer_up(Some(pos(0, 0)), Modifiers::NONE);

    assert_eq!(state.grid().cell(pos(0, 0)).unwrap().group, "group-2");
    assert_eq!(state.history().len(), 4);

    // undoing the relabel leaves the unrelated edit alone
    state.undo().unwrap();
    assert_eq!(state.grid().cell(pos(5, 5)), Some(&Cell::new("other", 1, "keep")));
    assert_eq!(state.grid().cell(pos(0, 0)).unwrap().group, "group-1");
}

// ============================================================================
// Erasing
// ============================================================================

#[test]
fn test_erase_stroke() {
    let mut state = state_with(&[(pos(0, 0), Cell::new("d", 0, "")), (pos(0, 2), Cell::new("d", 1, ""))]);
    state.set_tool(Tool::Erase);
    drag(&mut state, pos(0, 0), &[pos(0, 1), pos(0, 2)]);
    state.pointer_up(None, Modifiers::NONE);

    assert_eq!(state.grid().occupied_count(), 0);
    assert_eq!(state.history().len(), 2);
    assert_eq!(state.undo_description(), Some("Erase".to_string()));
}

#[test]
fn test_erase_starting_on_empty_cell() {
    let mut state = state_with(&[(pos(1, 1), Cell::new("d", 0, ""))]);
    state.set_tool(Tool::Erase);
    drag(&mut state, pos(0, 0), &[pos(1, 1)]);
    state.pointer_up(None, Modifiers::NONE);
    assert_eq!(state.grid().occupied_count(), 0);
}

#[test]
fn test_erase_without_touching_anything_adds_no_history() {
    let mut state = MatrixEditState::new();
    state.set_tool(Tool::Erase);
    drag(&mut state, pos(0, 0), &[pos(0, 1)]);
    state.pointer_up(None, Modifiers::NONE);
    assert_eq!(state.history().len(), 1);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_click_selects_and_deselects() {
    let mut state = state_with(&[(pos(0, 0), Cell::new("d", 0, "")), (pos(0, 1), Cell::new("d", 1, ""))]);

    click(&mut state, pos(0, 0), Modifiers::NONE);
    assert_eq!(state.selection().to_vec(), vec![pos(0, 0)]);

    click(&mut state, pos(0, 1), Modifiers::NONE);
    assert_eq!(state.selection().to_vec(), vec![pos(0, 1)]);

    click(&mut state, pos(0, 1), Modifiers::NONE);
    assert!(state.selection().is_empty());
}

#[test]
fn test_toggle_click() {
    let mut state = state_with(&[(pos(0, 0), Cell::new("d", 0, "")), (pos(0, 1), Cell::new("d", 1, ""))]);
    click(&mut state, pos(0, 0), Modifiers::TOGGLE);
    click(&mut state, pos(0, 1), Modifiers::TOGGLE);
    assert_eq!(state.selection().to_vec(), vec![pos(0, 0), pos(0, 1)]);

    click(&mut state, pos(0, 0), Modifiers::TOGGLE);
    assert_eq!(state.selection().to_vec(), vec![pos(0, 1)]);
}

#[test]
fn test_erase_click_does_not_select() {
    let mut state = state_with(&[(pos(0, 0), Cell::new("d", 0, ""))]);
    state.set_tool(Tool::Erase);
    click(&mut state, pos(0, 0), Modifiers::NONE);
    assert!(!state.grid().is_occupied(pos(0, 0)));
    assert!(state.selection().is_empty());
}

#[test]
fn test_click_paint_selects_new_cell() {
    let mut state = MatrixEditState::new();
    click(&mut state, pos(1, 1), Modifiers::NONE);
    assert!(state.grid().is_occupied(pos(1, 1)));
    assert_eq!(state.selection().to_vec(), vec![pos(1, 1)]);
}

#[test]
fn test_double_click_selects_group() {
    let mut state = state_with(&[
        (pos(0, 0), Cell::new("d", 0, "g1")),
        (pos(2, 3), Cell::new("d", 1, "g1")),
        (pos(1, 1), Cell::new("d", 2, "g2")),
    ]);
    state.double_click(pos(2, 3));
    assert_eq!(state.selection().to_vec(), vec![pos(0, 0), pos(2, 3)]);
}

#[test]
fn test_double_click_without_group_keeps_selection() {
    let mut state = state_with(&[(pos(0, 0), Cell::new("d", 0, "")), (pos(0, 1), Cell::new("d", 1, "g"))]);
    state.double_click(pos(0, 1));
    state.double_click(pos(0, 0));
    assert_eq!(state.selection().to_vec(), vec![pos(0, 1)]);
}

// ============================================================================
// Moving
// ============================================================================

fn two_cell_block() -> MatrixEditState {
    let mut state = state_with(&[(pos(0, 0), Cell::new("d", 0, "")), (pos(0, 1), Cell::new("d", 1, ""))]);
    state.set_selection([pos(0, 0), pos(0, 1)]);
    state
}

#[test]
fn test_move_selection() {
    let mut state = two_cell_block();
    drag(&mut state, pos(0, 0), &[pos(1, 0), pos(2, 1)]);

    assert!(state.interaction().is_dragging());
    assert!(state.pixel_state(pos(0, 0)).ghosted);
    assert_eq!(state.pixel_state(pos(2, 2)).drop_preview, Some(DropStatus::Valid));
    assert_eq!(state.cursor_hint(pos(2, 1)), CursorHint::Grabbing);
    assert_eq!(state.drag_label(), Some("2 pixels".to_string()));
    // previews never touch the committed grid
    assert!(state.grid().is_occupied(pos(0, 0)));

    state.pointer_up(Some(pos(2, 1)), Modifiers::NONE);
    assert!(state.interaction().is_idle());
    assert_eq!(state.grid().cell(pos(2, 1)), Some(&Cell::new("d", 0, "")));
    assert_eq!(state.grid().cell(pos(2, 2)), Some(&Cell::new("d", 1, "")));
    assert_eq!(state.grid().occupied_count(), 2);
    assert_eq!(state.selection().to_vec(), vec![pos(2, 1), pos(2, 2)]);
    assert_eq!(state.undo_description(), Some("Move 2 cells".to_string()));

    state.undo().unwrap();
    assert!(state.grid().is_occupied(pos(0, 0)));
    assert!(state.grid().is_occupied(pos(0, 1)));
    assert!(!state.grid().is_occupied(pos(2, 1)));
}

#[test]
fn test_move_overlapping_itself() {
    let mut state = two_cell_block();
    drag(&mut state, pos(0, 0), &[pos(0, 1)]);
    assert!(!state.interaction().collision());
    state.pointer_up(Some(pos(0, 1)), Modifiers::NONE);

    assert!(!state.grid().is_occupied(pos(0, 0)));
    assert_eq!(state.grid().cell(pos(0, 1)), Some(&Cell::new("d", 0, "")));
    assert_eq!(state.grid().cell(pos(0, 2)), Some(&Cell::new("d", 1, "")));
}

#[test]
fn test_move_collision_is_discarded() {
    let mut state = state_with(&[
        (pos(0, 0), Cell::new("d", 0, "")),
        (pos(0, 1), Cell::new("d", 1, "")),
        (pos(0, 2), Cell::new("d", 2, "")),
    ]);
    state.set_selection([pos(0, 0), pos(0, 1)]);
    drag(&mut state, pos(0, 0), &[pos(0, 1)]);

    assert!(state.interaction().collision());
    assert_eq!(state.pixel_state(pos(0, 2)).drop_preview, Some(DropStatus::Colliding));
    assert_eq!(state.pixel_state(pos(0, 1)).drop_preview, Some(DropStatus::Valid));
    assert_eq!(state.cursor_hint(pos(0, 1)), CursorHint::NotAllowed);

    let before = state.grid().clone();
    state.pointer_up(Some(pos(0, 1)), Modifiers::NONE);
    assert!(state.grid().ptr_eq(&before));
    assert_eq!(state.history().len(), 1);
}

#[test]
fn test_move_out_of_bounds_collides() {
    let mut state = two_cell_block();
    drag(&mut state, pos(0, 0), &[pos(0, 7)]);
    assert!(state.interaction().collision());
    state.pointer_up(Some(pos(0, 7)), Modifiers::NONE);
    assert!(state.grid().is_occupied(pos(0, 0)));
    assert!(!state.grid().is_occupied(pos(0, 7)));
}

#[test]
fn test_move_released_outside_grid_is_discarded() {
    let mut state = two_cell_block();
    drag(&mut state, pos(0, 0), &[pos(3, 3)]);
    state.pointer_leave();
    assert_eq!(state.interaction(), &InteractionState::Idle);
    assert!(state.grid().is_occupied(pos(0, 0)));
    assert_eq!(state.history().len(), 1);
}

#[test]
fn test_press_on_selection_without_drag_narrows_selection() {
    let mut state = two_cell_block();
    click(&mut state, pos(0, 1), Modifiers::NONE);
    assert_eq!(state.selection().to_vec(), vec![pos(0, 1)]);
}

// ============================================================================
// Hover feedback
// ============================================================================

#[test]
fn test_cursor_hints() {
    let mut state = state_with(&[(pos(0, 0), Cell::new("d", 0, "")), (pos(0, 1), Cell::new("d", 1, ""))]);
    state.set_selection([pos(0, 0)]);

    assert_eq!(state.cursor_hint(pos(0, 0)), CursorHint::Grab);
    assert_eq!(state.cursor_hint(pos(0, 1)), CursorHint::Default);
    assert_eq!(state.cursor_hint(pos(5, 5)), CursorHint::Paint);

    state.set_tool(Tool::Erase);
    assert_eq!(state.cursor_hint(pos(0, 0)), CursorHint::Erase);
}

#[test]
fn test_drag_label_while_painting() {
    let mut state = MatrixEditState::new();
    state.pointer_down(pos(0, 0));
    assert_eq!(state.drag_label(), None);
    state.pointer_move(true);
    assert_eq!(state.drag_label(), Some("Painting".to_string()));
    state.pointer_up(None, Modifiers::NONE);
    assert_eq!(state.drag_label(), None);
}

#[test]
fn test_invalid_binding_is_flagged() {
    let mut state = state_with(&[(pos(0, 0), Cell::new("strip", 9, "")), (pos(0, 1), Cell::new("strip", 1, ""))]);
    state.set_devices(vec![Device::new("strip", 5)]);
    assert!(state.pixel_state(pos(0, 0)).invalid);
    assert!(!state.pixel_state(pos(0, 1)).invalid);
    assert_eq!(state.validate_cells().len(), 1);
}

#[test]
fn test_sessions_are_independent() {
    let mut a = MatrixEditState::new();
    let b = MatrixEditState::new();
    a.set_tool(Tool::Erase);
    a.set_brush(Brush::new("x", 3, ""));
    assert_eq!(b.tool(), Tool::Paint);
    assert_eq!(b.brush(), &Brush::default());
}
