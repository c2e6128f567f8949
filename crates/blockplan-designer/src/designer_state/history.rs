//! Undo/redo for the designer state.

use super::FloorplanState;

impl FloorplanState {
    /// Undo last change
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        self.stroke = None;
        match self.history.undo(self.state.clone()) {
            Some(previous) => {
                self.state = previous;
                self.is_modified = true;
                true
            }
            None => false,
        }
    }

    /// Redo last undo
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        self.stroke = None;
        match self.history.redo(self.state.clone()) {
            Some(next) => {
                self.state = next;
                self.is_modified = true;
                true
            }
            None => false,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Drops all undo and redo snapshots.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
