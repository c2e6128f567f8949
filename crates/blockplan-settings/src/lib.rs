//! BlockPlan Settings Crate
//!
//! Handles application configuration: editor defaults, export layout and
//! where configuration files live on disk.

pub mod config;
pub mod error;

pub use config::{Config, EditorSettings, ExportSettings, MAX_GRID_SIDE, MAX_TILE_SIZE};
pub use error::{SettingsError, SettingsResult};
