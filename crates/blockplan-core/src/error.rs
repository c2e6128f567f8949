//! Error handling for BlockPlan
//!
//! Every error in the editor is local and recoverable. A failed operation
//! leaves the editor state exactly as it was, so callers only need to surface
//! the message.
//!
//! Rejected placements (out-of-grid pointer positions, blocked double-cell
//! tiles) are not errors; they are reported as values by the placement engine.

use thiserror::Error;

/// Editor error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Grid dimensions must be even and positive
    #[error("Grid dimensions must be even and positive, got {width}x{height}")]
    InvalidDimensions {
        /// The requested width in cells.
        width: u32,
        /// The requested height in cells.
        height: u32,
    },

    /// The last remaining floor cannot be deleted
    #[error("At least one floor is required")]
    LastFloor,

    /// Floor index does not exist
    #[error("Floor {index} does not exist ({count} floors)")]
    FloorOutOfRange {
        /// The requested floor index.
        index: usize,
        /// The number of floors in the building.
        count: usize,
    },

    /// Tile identifier is not in the catalog
    #[error("Unknown tile: {0}")]
    UnknownTile(String),

    /// Floor fill only accepts single-cell tiles
    #[error("Cannot fill a floor with double-cell tile {0}")]
    DoubleTileFill(String),

    /// Catalog already holds a tile with this identifier
    #[error("Tile {0} is already registered")]
    DuplicateTile(String),
}

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
