//! Block counting for the live readout and export labels.

use crate::editor_state::EditorState;
use crate::floor::Floor;
use blockplan_core::{TileCatalog, TileId};
use std::collections::HashMap;

/// Per-tile occurrence counts, in first-seen order
///
/// Only counted cells contribute: empty cells and the head half of
/// double-cell tiles are skipped, so a bed counts once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockCounts {
    entries: Vec<(TileId, usize)>,
    index: HashMap<TileId, usize>,
}

impl BlockCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the primary layer of one floor, row by row.
    pub fn for_floor(floor: &Floor) -> Self {
        let mut counts = Self::new();
        counts.add_floor(floor);
        counts
    }

    /// Counts every visible floor, in floor order.
    pub fn for_visible(state: &EditorState) -> Self {
        let mut counts = Self::new();
        for floor in state.floors().iter().filter(|f| f.visible) {
            counts.add_floor(floor);
        }
        counts
    }

    fn add_floor(&mut self, floor: &Floor) {
        for (_, _, cell) in floor.grid.iter() {
            if !cell.is_counted() {
                continue;
            }
            if let Some(block) = &cell.block {
                self.add(block);
            }
        }
    }

    fn add(&mut self, id: &TileId) {
        match self.index.get(id) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id.clone(), 1));
            }
        }
    }

    pub fn get(&self, id: &TileId) -> usize {
        self.index.get(id).map_or(0, |&i| self.entries[i].1)
    }

    pub fn entries(&self) -> &[(TileId, usize)] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `"DisplayName: count"` for each tile.
    pub fn labels(&self, catalog: &TileCatalog) -> Vec<String> {
        self.entries
            .iter()
            .map(|(id, n)| format!("{}: {}", catalog.name_of(id), n))
            .collect()
    }

    /// Single-line summary, labels joined with `" | "`.
    pub fn summary(&self, catalog: &TileCatalog) -> String {
        self.labels(catalog).join(" | ")
    }
}
