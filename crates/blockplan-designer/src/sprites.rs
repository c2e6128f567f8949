//! Tile sprites, decoded once and kept as premultiplied pixmaps.

use blockplan_core::{TileCatalog, TileId};
use image::RgbaImage;
use std::collections::HashMap;
use std::path::Path;
use tiny_skia::{ColorU8, Pixmap, PixmapRef};

/// Sprites keyed by tile identifier
///
/// A tile without a sprite renders as an empty cell.
#[derive(Debug, Clone, Default)]
pub struct SpriteSheet {
    sprites: HashMap<TileId, Pixmap>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `{asset_dir}/{id}.png` for every catalog tile.
    ///
    /// Missing or undecodable files are skipped.
    pub fn load_dir(asset_dir: &Path, catalog: &TileCatalog) -> Self {
        let mut sheet = Self::new();
        for def in catalog.tiles() {
            let path = TileCatalog::sprite_path(&def.id, asset_dir);
            match image::open(&path) {
                Ok(img) => sheet.insert(def.id.clone(), &img.to_rgba8()),
                Err(err) => tracing::debug!("No sprite for {} at {}: {}", def.id, path.display(), err),
            }
        }
        tracing::info!(
            "Loaded {} of {} sprites from {}",
            sheet.len(),
            catalog.len(),
            asset_dir.display()
        );
        sheet
    }

    /// Adds or replaces a sprite. Zero-sized images are ignored.
    pub fn insert(&mut self, id: TileId, image: &RgbaImage) {
        let Some(mut pixmap) = Pixmap::new(image.width(), image.height()) else {
            tracing::debug!("Ignoring empty sprite for {}", id);
            return;
        };
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        self.sprites.insert(id, pixmap);
    }

    pub fn get(&self, id: &TileId) -> Option<PixmapRef<'_>> {
        self.sprites.get(id).map(Pixmap::as_ref)
    }

    pub fn contains(&self, id: &TileId) -> bool {
        self.sprites.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
