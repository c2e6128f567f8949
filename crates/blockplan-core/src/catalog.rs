//! Tile catalog
//!
//! Static registry mapping tile identifiers to their category, display name,
//! target layer and cell span. Whether a tile is double-cell is an explicit
//! attribute of its [`TileDef`]; it is never derived from the identifier.

use crate::error::{EditorError, Result};
use crate::tile::{CellSpan, TileId, TileLayer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Palette grouping for a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileCategory {
    Wood,
    Stone,
    Mineral,
    Natural,
    Utility,
    Decoration,
    Furniture,
    Accessory,
}

impl std::fmt::Display for TileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wood => write!(f, "Wood"),
            Self::Stone => write!(f, "Stone"),
            Self::Mineral => write!(f, "Mineral"),
            Self::Natural => write!(f, "Natural"),
            Self::Utility => write!(f, "Utility"),
            Self::Decoration => write!(f, "Decoration"),
            Self::Furniture => write!(f, "Furniture"),
            Self::Accessory => write!(f, "Accessory"),
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDef {
    pub id: TileId,
    pub name: String,
    pub category: TileCategory,
    pub layer: TileLayer,
    pub span: CellSpan,
}

impl TileDef {
    /// Single-cell primary-layer tile named after its identifier.
    pub fn block(id: &str, category: TileCategory) -> Self {
        Self {
            id: TileId::from(id),
            name: display_name(id),
            category,
            layer: TileLayer::Primary,
            span: CellSpan::Single,
        }
    }

    /// Double-cell primary-layer tile (foot + head).
    pub fn double(id: &str, category: TileCategory) -> Self {
        Self {
            span: CellSpan::Double,
            ..Self::block(id, category)
        }
    }

    /// Accessory-layer tile.
    pub fn accessory(id: &str) -> Self {
        Self {
            layer: TileLayer::Accessory,
            ..Self::block(id, TileCategory::Accessory)
        }
    }

    pub fn is_double(&self) -> bool {
        self.span == CellSpan::Double
    }
}

/// Normalizes an identifier for display.
///
/// Underscores become spaces and the first letter of each word is upper-cased:
/// `"block_of_iron"` becomes `"Block Of Iron"`.
pub fn display_name(id: &str) -> String {
    id.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const WOOD: &[&str] = &[
    "acacia_log",
    "acacia_planks",
    "birch_log",
    "birch_plank",
    "oak_log",
    "oak_planks",
    "spruce_log",
    "spruce_planks",
];
const STONE: &[&str] = &[
    "basal",
    "bricks",
    "cobblestone",
    "mossy_cobblestone",
    "mud_bricks",
    "sandstone",
    "stone",
    "white_glazed_terracotta",
];
const MINERAL: &[&str] = &[
    "block_of_diamond",
    "block_of_emerald",
    "block_of_gold",
    "block_of_iron",
];
const NATURAL: &[&str] = &[
    "farmland",
    "ice",
    "moss_block",
    "mycelium",
    "podzol",
    "red_sand",
    "sand",
];
const UTILITY: &[&str] = &[
    "beacon",
    "bookshelf",
    "chest",
    "crafting_table",
    "enchanting_table",
    "jukebox",
    "off_furnace",
];
const DECORATION: &[&str] = &["glass", "glowstone", "wool"];
const FURNITURE: &[&str] = &["bed", "double_chest"];
const ACCESSORIES: &[&str] = &["torch", "lantern", "flower_pot", "carpet", "painting"];

/// Registry of placeable tiles, in palette order
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    tiles: Vec<TileDef>,
    index: HashMap<TileId, usize>,
}

impl TileCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in tile set, sorted alphabetically within the primary layer.
    pub fn builtin() -> &'static TileCatalog {
        static CATALOG: OnceLock<TileCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::standard)
    }

    /// Builds a fresh copy of the built-in tile set.
    pub fn standard() -> Self {
        let mut defs: Vec<TileDef> = Vec::new();
        let groups = [
            (WOOD, TileCategory::Wood),
            (STONE, TileCategory::Stone),
            (MINERAL, TileCategory::Mineral),
            (NATURAL, TileCategory::Natural),
            (UTILITY, TileCategory::Utility),
            (DECORATION, TileCategory::Decoration),
        ];
        for (ids, category) in groups {
            defs.extend(ids.iter().map(|id| TileDef::block(id, category)));
        }
        defs.sort_by(|a, b| a.id.cmp(&b.id));
        defs.extend(
            FURNITURE
                .iter()
                .map(|id| TileDef::double(id, TileCategory::Furniture)),
        );
        defs.extend(ACCESSORIES.iter().map(|id| TileDef::accessory(id)));

        let mut catalog = Self::new();
        for def in defs {
            let registered = catalog.register(def);
            debug_assert!(registered.is_ok(), "duplicate built-in tile");
        }
        catalog
    }

    /// Adds a tile; identifiers must be unique.
    pub fn register(&mut self, def: TileDef) -> Result<()> {
        if self.index.contains_key(&def.id) {
            tracing::warn!("Rejected duplicate tile registration: {}", def.id);
            return Err(EditorError::DuplicateTile(def.id.to_string()));
        }
        self.index.insert(def.id.clone(), self.tiles.len());
        self.tiles.push(def);
        Ok(())
    }

    pub fn get(&self, id: &TileId) -> Option<&TileDef> {
        self.index.get(id).map(|&i| &self.tiles[i])
    }

    /// Looks up a tile, failing with [`EditorError::UnknownTile`].
    pub fn require(&self, id: &TileId) -> Result<&TileDef> {
        self.get(id)
            .ok_or_else(|| EditorError::UnknownTile(id.to_string()))
    }

    pub fn contains(&self, id: &TileId) -> bool {
        self.index.contains_key(id)
    }

    pub fn is_double(&self, id: &TileId) -> bool {
        self.get(id).is_some_and(TileDef::is_double)
    }

    /// All tiles in palette order.
    pub fn tiles(&self) -> impl Iterator<Item = &TileDef> {
        self.tiles.iter()
    }

    pub fn tiles_in(&self, category: TileCategory) -> impl Iterator<Item = &TileDef> {
        self.tiles.iter().filter(move |t| t.category == category)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Display name for a tile, falling back to the normalized identifier.
    pub fn name_of(&self, id: &TileId) -> String {
        match self.get(id) {
            Some(def) => def.name.clone(),
            None => display_name(id.as_str()),
        }
    }

    /// Sprite location for a tile: `{asset_dir}/{id}.png`.
    pub fn sprite_path(id: &TileId, asset_dir: &Path) -> PathBuf {
        asset_dir.join(format!("{}.png", id.as_str()))
    }
}
