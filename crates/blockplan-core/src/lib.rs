//! # BlockPlan Core
//!
//! Core types shared by every BlockPlan crate:
//!
//! - **Tiles**: [`TileId`], [`Rotation`], [`CellSpan`], [`TileLayer`]
//! - **Catalog**: the static registry of placeable tiles ([`TileCatalog`])
//! - **Errors**: the editor error taxonomy ([`EditorError`])
//!
//! Nothing in this crate owns mutable editor state; the grid model, history
//! and compositor live in `blockplan-designer`.

pub mod catalog;
pub mod error;
pub mod tile;

pub use catalog::{display_name, TileCatalog, TileCategory, TileDef};
pub use error::{EditorError, Result};
pub use tile::{CellSpan, Rotation, TileId, TileLayer};
