//! # BlockPlan
//!
//! A grid floorplan editor for tile-based building games:
//! - Multi-floor buildings on an even-sized grid of named block tiles
//! - Double-cell furniture that occupies two adjacent squares
//! - Snapshot undo/redo with pointer strokes recorded as one step
//! - Labeled PNG export of every floor with block statistics
//!
//! ## Architecture
//!
//! BlockPlan is organized as a workspace with multiple crates:
//!
//! 1. **blockplan-core** - Tile identifiers, rotations, the tile catalog, errors
//! 2. **blockplan-settings** - Configuration file handling
//! 3. **blockplan-designer** - Grids, floors, placement, history, rendering, export
//! 4. **blockplan** - Scripted session driver and binary

pub mod script;

pub use blockplan_core::{
    display_name, CellSpan, EditorError, Rotation, TileCatalog, TileCategory, TileDef, TileId,
    TileLayer,
};

pub use blockplan_designer::{
    pixel_to_cell, render_floor, render_view, BlockCounts, Compositor, EditorState,
    ExportArtifact, ExportError, ExportHeader, ExportLayout, Floor, FloorplanState, GridSize,
    Placement, PlacementEngine, PointerButton, Rejection, SpriteSheet, Typesetter,
};

pub use blockplan_settings::{Config, EditorSettings, ExportSettings, SettingsError};

pub use script::{parse_script, Command, FloorCommand, ScriptError, ScriptLine, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    // Logs go to stderr so command output on stdout stays clean.
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
