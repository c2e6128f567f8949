//! Pointer and keyboard handling.
//!
//! A press-drag-release gesture is one stroke: it paints (primary button) or
//! erases (secondary button) every cell the pointer crosses and produces a
//! single undo entry.

use super::FloorplanState;
use crate::editor_state::EditorState;
use crate::placement::Placement;
use blockplan_core::Rotation;

/// Mouse button that started a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Paints the current tool
    Primary,
    /// Erases
    Secondary,
}

#[derive(Debug, Clone)]
pub(crate) struct Stroke {
    erase: bool,
    last_cell: (i64, i64),
    // Taken at pointer-down, recorded on the first effective edit.
    pending: Option<EditorState>,
}

/// Maps canvas-local pixels to grid coordinates by floor division.
///
/// Non-finite input maps to `(-1, -1)`, which lies outside every grid.
pub fn pixel_to_cell(px: f64, py: f64, tile_size: u32) -> (i64, i64) {
    if !px.is_finite() || !py.is_finite() {
        return (-1, -1);
    }
    let tile = tile_size.max(1) as f64;
    ((px / tile).floor() as i64, (py / tile).floor() as i64)
}

impl FloorplanState {
    /// Starts a stroke and paints the cell under the pointer.
    pub fn pointer_down(&mut self, button: PointerButton, px: f64, py: f64) -> Placement {
        let cell = pixel_to_cell(px, py, self.tile_size);
        self.stroke = Some(Stroke {
            erase: button == PointerButton::Secondary,
            last_cell: cell,
            pending: Some(self.state.clone()),
        });
        self.stroke_paint(cell)
    }

    /// Tracks the pointer; while a stroke is active, paints each newly
    /// entered cell. Returns the hovered cell when it is inside the grid.
    pub fn pointer_move(&mut self, px: f64, py: f64) -> Option<(u32, u32)> {
        let cell = pixel_to_cell(px, py, self.tile_size);
        let hovered = self.state.size().checked(cell.0, cell.1);
        if hovered.is_some() {
            let entered = self
                .stroke
                .as_ref()
                .is_some_and(|stroke| stroke.last_cell != cell);
            if entered {
                if let Some(stroke) = self.stroke.as_mut() {
                    stroke.last_cell = cell;
                }
                self.stroke_paint(cell);
            }
        }
        hovered
    }

    /// Ends the stroke on button release.
    pub fn pointer_up(&mut self) {
        self.stroke = None;
    }

    /// Ends the stroke when the pointer leaves the canvas.
    pub fn pointer_leave(&mut self) {
        self.stroke = None;
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Keyboard shortcuts; `r` cycles the placement rotation.
    ///
    /// Returns the new rotation when the key was handled.
    pub fn key_pressed(&mut self, key: char) -> Option<Rotation> {
        match key {
            'r' | 'R' => Some(self.rotate_tool()),
            _ => None,
        }
    }

    fn stroke_paint(&mut self, (x, y): (i64, i64)) -> Placement {
        let Some(erase) = self.stroke.as_ref().map(|s| s.erase) else {
            return self.place_at(x, y);
        };
        let outcome = self.apply_tool(x, y, erase);
        if outcome.is_applied() {
            if let Some(before) = self.stroke.as_mut().and_then(|s| s.pending.take()) {
                self.commit(before);
            }
        }
        outcome
    }
}
