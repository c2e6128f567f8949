//! # BlockPlan Designer
//!
//! The layered grid editing model behind the floorplan editor, plus the
//! renderers that turn it into pixels.
//!
//! ## Core Components
//!
//! - **Grid Store**: per-floor cell grids with a parallel accessory layer
//! - **Floor Manager**: ordered, nameable, hideable floors
//! - **Placement Engine**: single- and double-cell placement with rotation
//! - **History**: snapshot-based undo/redo
//! - **Counting**: per-tile block counts for display and export labels
//! - **Compositor**: multi-floor PNG export with wrapped statistics
//!
//! ## Architecture
//!
//! ```text
//! FloorplanState (controller, owns everything)
//!   ├── EditorState (floors + active floor + grid size)
//!   │     └── Floor (primary Grid<Cell> + accessory Grid)
//!   ├── UndoRedoManager<EditorState>
//!   └── ToolSelection (tile + rotation)
//!
//! Renderer / Compositor (read-only over &EditorState)
//!   ├── SpriteSheet
//!   └── Typesetter (font_manager)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockplan_designer::FloorplanState;
//!
//! let mut designer = FloorplanState::new(catalog, size, 20, "stone".into())?;
//! designer.place_at(1, 1);
//! designer.undo();
//! ```

pub mod counts;
pub mod designer_state;
pub mod editor_state;
pub mod export;
pub mod floor;
pub mod font_manager;
pub mod grid;
pub mod history;
pub mod placement;
pub mod renderer;
pub mod sprites;
pub mod text;

pub use counts::BlockCounts;
pub use designer_state::{pixel_to_cell, FloorplanState, PointerButton, ToolSelection};
pub use editor_state::EditorState;
pub use export::{
    Compositor, ExportArtifact, ExportError, ExportHeader, ExportLayout, ExportResult,
};
pub use floor::Floor;
pub use grid::{Cell, CellPart, Grid, GridSize};
pub use history::UndoRedoManager;
pub use placement::{Placement, PlacementEngine, Rejection};
pub use renderer::{render_floor, render_view};
pub use sprites::SpriteSheet;
pub use text::{TextStyle, Typesetter};
