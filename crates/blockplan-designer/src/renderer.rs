//! Floor renderer
//! Draws floors to pixmaps using tiny-skia. The live view and the export
//! compositor share the tile and grid-line routines here.

use crate::editor_state::EditorState;
use crate::floor::Floor;
use crate::grid::{CellPart, GridSize};
use crate::sprites::SpriteSheet;
use blockplan_core::Rotation;
use image::{Rgb, RgbImage};
use tiny_skia::{
    Color, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, PixmapRef, Stroke, Transform,
};

/// Opacity of visible floors drawn beneath the active one
const GHOST_OPACITY: f32 = 0.35;

fn view_background() -> Color {
    Color::WHITE
}
fn view_grid_color() -> Color {
    Color::BLACK
}

/// Draws every non-empty cell of both layers with the floor's top-left
/// corner at `origin`.
///
/// Double-cell tiles are drawn once from their foot, spanning two tiles
/// towards the head. Accessories go on top, never rotated.
pub(crate) fn draw_floor_tiles(
    pixmap: &mut Pixmap,
    floor: &Floor,
    origin: (f32, f32),
    tile: f32,
    sprites: &SpriteSheet,
    opacity: f32,
) {
    for (x, y, cell) in floor.grid.iter() {
        if cell.part == CellPart::Head {
            continue;
        }
        let Some(sprite) = cell.block.as_ref().and_then(|id| sprites.get(id)) else {
            continue;
        };
        let left = origin.0 + x as f32 * tile;
        let top = origin.1 + y as f32 * tile;
        if cell.part == CellPart::Foot {
            let (dx, dy) = cell.rotation.extension_offset();
            // Center of the two-cell rectangle.
            let cx = left + tile * (1.0 + dx as f32) / 2.0;
            let cy = top + tile * (1.0 + dy as f32) / 2.0;
            draw_sprite(pixmap, sprite, (cx, cy), (2.0 * tile, tile), cell.rotation, opacity);
        } else {
            let center = (left + tile / 2.0, top + tile / 2.0);
            draw_sprite(pixmap, sprite, center, (tile, tile), cell.rotation, opacity);
        }
    }

    for (x, y, accessory) in floor.accessories.iter() {
        let Some(sprite) = accessory.as_ref().and_then(|id| sprites.get(id)) else {
            continue;
        };
        let center = (
            origin.0 + x as f32 * tile + tile / 2.0,
            origin.1 + y as f32 * tile + tile / 2.0,
        );
        draw_sprite(pixmap, sprite, center, (tile, tile), Rotation::Deg0, opacity);
    }
}

/// Scales a sprite to `extent` (before rotation), centers it on `center`
/// and rotates it about that center.
fn draw_sprite(
    pixmap: &mut Pixmap,
    sprite: PixmapRef<'_>,
    center: (f32, f32),
    extent: (f32, f32),
    rotation: Rotation,
    opacity: f32,
) {
    let (cx, cy) = center;
    let (w, h) = extent;
    let transform = Transform::from_scale(w / sprite.width() as f32, h / sprite.height() as f32)
        .post_translate(cx - w / 2.0, cy - h / 2.0)
        .post_rotate_at(rotation.degrees() as f32, cx, cy);
    let paint = PixmapPaint {
        opacity,
        quality: FilterQuality::Nearest,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, sprite, &paint, transform, None);
}

/// Strokes 1-pixel grid lines over a tile area, aligned to pixel centers.
pub(crate) fn draw_grid_lines(
    pixmap: &mut Pixmap,
    origin: (f32, f32),
    size: GridSize,
    tile: f32,
    color: Color,
) {
    let width = size.width() as f32 * tile;
    let height = size.height() as f32 * tile;
    // Keeps the closing line inside the tile area.
    let align = |offset: f32, limit: f32| offset.min(limit - 1.0).floor() + 0.5;

    let mut pb = PathBuilder::new();
    for i in 0..=size.width() {
        let x = origin.0 + align(i as f32 * tile, width);
        pb.move_to(x, origin.1);
        pb.line_to(x, origin.1 + height);
    }
    for j in 0..=size.height() {
        let y = origin.1 + align(j as f32 * tile, height);
        pb.move_to(origin.0, y);
        pb.line_to(origin.0 + width, y);
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = false;
    let stroke = Stroke {
        width: 1.0,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Convert Pixmap to RgbImage, assuming an opaque background.
pub(crate) fn pixmap_to_rgb(pixmap: &Pixmap) -> RgbImage {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    RgbImage::from_fn(width, pixmap.height(), |x, y| {
        let c = pixels[(y * width + x) as usize].demultiply();
        Rgb([c.red(), c.green(), c.blue()])
    })
}

/// A background-filled canvas for the grid, or `None` when the pixel size
/// overflows or cannot be allocated.
fn canvas(size: GridSize, tile_size: u32) -> Option<Pixmap> {
    let tile_size = tile_size.max(1);
    let width = size.width().checked_mul(tile_size);
    let height = size.height().checked_mul(tile_size);
    let Some(mut pixmap) = width.zip(height).and_then(|(w, h)| Pixmap::new(w, h)) else {
        tracing::warn!(
            "Cannot render a {}x{} grid at {}px per tile",
            size.width(),
            size.height(),
            tile_size
        );
        return None;
    };
    pixmap.fill(view_background());
    Some(pixmap)
}

/// Render one floor with black grid lines, as the editor canvas shows it.
///
/// An empty image is returned when the canvas would be too large.
pub fn render_floor(floor: &Floor, tile_size: u32, sprites: &SpriteSheet) -> RgbImage {
    let size = floor.size();
    let Some(mut pixmap) = canvas(size, tile_size) else {
        return RgbImage::new(0, 0);
    };
    let tile = tile_size.max(1) as f32;
    draw_floor_tiles(&mut pixmap, floor, (0.0, 0.0), tile, sprites, 1.0);
    draw_grid_lines(&mut pixmap, (0.0, 0.0), size, tile, view_grid_color());
    pixmap_to_rgb(&pixmap)
}

/// Render the editor view: visible floors below the active one faded, then
/// the active floor if it is visible.
pub fn render_view(state: &EditorState, tile_size: u32, sprites: &SpriteSheet) -> RgbImage {
    let size = state.size();
    let Some(mut pixmap) = canvas(size, tile_size) else {
        return RgbImage::new(0, 0);
    };
    let tile = tile_size.max(1) as f32;
    let active = state.active_index();
    for (index, floor) in state.floors().iter().enumerate().take(active + 1) {
        if !floor.visible {
            continue;
        }
        let opacity = if index == active { 1.0 } else { GHOST_OPACITY };
        draw_floor_tiles(&mut pixmap, floor, (0.0, 0.0), tile, sprites, opacity);
    }
    draw_grid_lines(&mut pixmap, (0.0, 0.0), size, tile, view_grid_color());
    pixmap_to_rgb(&pixmap)
}
