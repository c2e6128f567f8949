//! Designer state manager for UI integration.
//! Owns the building being edited and translates UI actions into edits.
//!
//! This module is split into submodules for better organization:
//! - `history`: Undo/redo functionality
//! - `floors`: Floor management, resize, fill and clear
//! - `tools`: Tile selection, rotation and placement
//! - `input`: Pointer strokes and keyboard shortcuts

mod floors;
mod history;
mod input;
mod tools;

pub use input::{pixel_to_cell, PointerButton};
pub use tools::ToolSelection;

use crate::counts::BlockCounts;
use crate::editor_state::EditorState;
use crate::grid::GridSize;
use crate::history::UndoRedoManager;
use blockplan_core::{Result, TileCatalog, TileId};
use blockplan_settings::Config;
use std::sync::Arc;

/// Designer state for UI integration
#[derive(Debug, Clone)]
pub struct FloorplanState {
    pub(crate) state: EditorState,
    pub(crate) history: UndoRedoManager<EditorState>,
    pub(crate) catalog: Arc<TileCatalog>,
    pub(crate) tool: ToolSelection,
    pub(crate) stroke: Option<input::Stroke>,
    pub(crate) tile_size: u32,
    pub is_modified: bool,
}

impl FloorplanState {
    /// Creates a designer with one empty floor of `size`.
    pub fn new(
        catalog: Arc<TileCatalog>,
        size: GridSize,
        history_capacity: usize,
        tile: TileId,
    ) -> Result<Self> {
        let tool = ToolSelection::new(&catalog, tile)?;
        Ok(Self {
            state: EditorState::new(size),
            history: UndoRedoManager::new(history_capacity),
            catalog,
            tool,
            stroke: None,
            tile_size: 32,
            is_modified: false,
        })
    }

    /// Creates a designer from the editor section of the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let editor = &config.editor;
        let size = GridSize::new(editor.grid_width, editor.grid_height)?;
        let mut designer = Self::new(
            Arc::new(TileCatalog::builtin().clone()),
            size,
            editor.history_capacity,
            editor.default_tile.clone(),
        )?;
        designer.tile_size = editor.tile_size.max(1);
        Ok(designer)
    }

    /// Read-only view of the building.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn set_tile_size(&mut self, tile_size: u32) {
        debug_assert!(tile_size > 0, "tile_size must be positive");
        self.tile_size = tile_size.max(1);
    }

    /// Counts across all visible floors, for the live readout.
    pub fn visible_counts(&self) -> BlockCounts {
        BlockCounts::for_visible(&self.state)
    }

    /// Counts on the active floor only.
    pub fn active_counts(&self) -> BlockCounts {
        BlockCounts::for_floor(self.state.active_floor())
    }

    /// Live readout lines, e.g. `["Stone: 4", "Bed: 1"]`.
    pub fn count_labels(&self) -> Vec<String> {
        self.visible_counts().labels(&self.catalog)
    }

    /// Stores the pre-edit state in history and marks the design modified.
    pub(crate) fn commit(&mut self, before: EditorState) {
        self.history.record(before);
        self.is_modified = true;
    }
}
