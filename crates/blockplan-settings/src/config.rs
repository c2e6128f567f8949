//! Configuration and settings management for BlockPlan
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Editor defaults (tile size, grid size, history depth, starting tile)
//! - Export layout (panel columns, padding, header and label bands, fonts)

use crate::error::{SettingsError, SettingsResult};
use blockplan_core::{TileCatalog, TileId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest accepted cell size in pixels
pub const MAX_TILE_SIZE: u32 = 512;
/// Largest accepted grid side in cells
pub const MAX_GRID_SIDE: u32 = 1024;

/// Editor defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Pixel size of one grid cell
    pub tile_size: u32,
    /// Initial grid width in cells (even)
    pub grid_width: u32,
    /// Initial grid height in cells (even)
    pub grid_height: u32,
    /// Maximum number of undo snapshots kept
    pub history_capacity: usize,
    /// Tile selected when the editor starts
    pub default_tile: TileId,
    /// Directory holding `{tile}.png` sprites
    pub asset_dir: PathBuf,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tile_size: 32,
            grid_width: 16,
            grid_height: 16,
            history_capacity: 20,
            default_tile: TileId::from("stone"),
            asset_dir: PathBuf::from("assets"),
        }
    }
}

/// Export image layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Floor panels per row
    pub columns: u32,
    /// Gap between panels and around the page edge, in pixels
    pub padding: u32,
    /// Height of the student/project header band
    pub header_height: u32,
    /// Height of the per-floor name and statistics band
    pub label_height: u32,
    /// Horizontal inset of label text inside a panel
    pub text_inset: u32,
    /// Font family used for labels ("Sans", "Serif", "Monospace" or a name)
    pub font_family: String,
    /// Directory export artifacts are written to
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            columns: 2,
            padding: 20,
            header_height: 70,
            label_height: 60,
            text_inset: 10,
            font_family: "Sans".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Editor defaults
    pub editor: EditorSettings,
    /// Export layout
    pub export: ExportSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/blockplan/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("blockplan").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = Format::of(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let editor = &self.editor;
        if editor.tile_size == 0 || editor.tile_size > MAX_TILE_SIZE {
            return Err(SettingsError::invalid(
                "editor.tile_size",
                format!("must be between 1 and {MAX_TILE_SIZE}, got {}", editor.tile_size),
            ));
        }
        for (key, value) in [
            ("editor.grid_width", editor.grid_width),
            ("editor.grid_height", editor.grid_height),
        ] {
            if value == 0 || value % 2 != 0 {
                return Err(SettingsError::invalid(
                    key,
                    format!("must be even and positive, got {value}"),
                ));
            }
            if value > MAX_GRID_SIDE {
                return Err(SettingsError::invalid(
                    key,
                    format!("must be at most {MAX_GRID_SIDE}, got {value}"),
                ));
            }
        }
        if editor.history_capacity == 0 {
            return Err(SettingsError::invalid(
                "editor.history_capacity",
                "must be > 0",
            ));
        }
        if !TileCatalog::builtin().contains(&editor.default_tile) {
            return Err(SettingsError::invalid(
                "editor.default_tile",
                format!("unknown tile {}", editor.default_tile),
            ));
        }

        let export = &self.export;
        if export.columns == 0 {
            return Err(SettingsError::invalid("export.columns", "must be > 0"));
        }
        if export.label_height == 0 {
            return Err(SettingsError::invalid("export.label_height", "must be > 0"));
        }
        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
