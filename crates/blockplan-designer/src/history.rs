//! Snapshot-based undo/redo.
//!
//! Each entry is a complete deep copy of the editable state taken before a
//! mutation. History is linear: recording a new snapshot discards the redo
//! chain.

use std::collections::VecDeque;

/// Default number of undo snapshots kept
pub const DEFAULT_CAPACITY: usize = 20;

/// Bounded undo and redo stacks of state snapshots
#[derive(Debug, Clone)]
pub struct UndoRedoManager<S> {
    undo_stack: VecDeque<S>,
    redo_stack: Vec<S>,
    capacity: usize,
}

impl<S: Clone> UndoRedoManager<S> {
    /// Creates an empty history keeping at most `capacity` undo snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stores the state as it was before a new user edit.
    ///
    /// Evicts the oldest snapshot past capacity and clears the redo stack.
    pub fn record(&mut self, snapshot: S) {
        self.push_undo(snapshot);
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, snapshot: S) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
    }

    /// Steps back one snapshot.
    ///
    /// `current` is the live state, which becomes redoable. Returns the state
    /// to restore, or `None` (and drops `current`) when there is nothing to undo.
    pub fn undo(&mut self, current: S) -> Option<S> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Re-applies the most recently undone snapshot.
    pub fn redo(&mut self, current: S) -> Option<S> {
        let next = self.redo_stack.pop()?;
        self.push_undo(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<S: Clone> Default for UndoRedoManager<S> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
