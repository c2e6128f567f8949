use blockplan_core::{Rotation, TileCatalog, TileId};
use blockplan_designer::{
    render_floor, render_view, EditorState, GridSize, PlacementEngine, SpriteSheet,
};
use image::{Rgb, Rgba, RgbaImage};

fn sheet() -> SpriteSheet {
    let mut sheet = SpriteSheet::new();
    sheet.insert(
        TileId::from("stone"),
        &RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])),
    );
    // Top row dark, bottom row light, to observe rotation.
    let mut log = RgbaImage::from_pixel(2, 2, Rgba([200, 200, 200, 255]));
    log.put_pixel(0, 0, Rgba([10, 10, 10, 255]));
    log.put_pixel(1, 0, Rgba([10, 10, 10, 255]));
    sheet.insert(TileId::from("oak_log"), &log);
    sheet
}

fn stone_at(state: &mut EditorState, floor: usize, x: i64, y: i64) {
    let engine = PlacementEngine::new(TileCatalog::builtin());
    engine.place_block(
        state.floor_mut(floor).unwrap(),
        x,
        y,
        &TileId::from("stone"),
        Rotation::Deg0,
        false,
    );
}

#[test]
fn test_view_size_and_grid_lines() {
    let state = EditorState::new(GridSize::new(4, 2).unwrap());
    let image = render_view(&state, 16, &sheet());
    assert_eq!(image.dimensions(), (64, 32));
    assert_eq!(image.get_pixel(0, 5), &Rgb([0, 0, 0]));
    assert_eq!(image.get_pixel(16, 5), &Rgb([0, 0, 0]));
    assert_eq!(image.get_pixel(8, 8), &Rgb([255, 255, 255]));
}

#[test]
fn test_oversized_view_renders_empty() {
    let state = EditorState::new(GridSize::new(65_536, 2).unwrap());
    let image = render_view(&state, 70_000, &sheet());
    assert_eq!(image.dimensions(), (0, 0));
    let image = render_floor(state.active_floor(), 70_000, &sheet());
    assert_eq!(image.dimensions(), (0, 0));
}

#[test]
fn test_active_floor_drawn_opaque() {
    let mut state = EditorState::new(GridSize::new(2, 2).unwrap());
    stone_at(&mut state, 0, 1, 1);
    let image = render_view(&state, 32, &sheet());
    assert_eq!(image.get_pixel(48, 48), &Rgb([255, 0, 0]));
    assert_eq!(image.get_pixel(16, 16), &Rgb([255, 255, 255]));
}

#[test]
fn test_lower_floor_is_faded() {
    let mut state = EditorState::new(GridSize::new(2, 2).unwrap());
    stone_at(&mut state, 0, 0, 0);
    state.add_floor();
    let image = render_view(&state, 32, &sheet());
    let Rgb([r, g, b]) = *image.get_pixel(16, 16);
    assert!(r > 240, "red channel {r}");
    assert!((140..200).contains(&g) && g == b, "faded to {g}");

    // Hidden floors are not drawn at all.
    state.set_visible(0, false).unwrap();
    let image = render_view(&state, 32, &sheet());
    assert_eq!(image.get_pixel(16, 16), &Rgb([255, 255, 255]));
}

#[test]
fn test_floors_above_active_are_not_drawn() {
    let mut state = EditorState::new(GridSize::new(2, 2).unwrap());
    state.add_floor();
    stone_at(&mut state, 1, 0, 0);
    state.set_active(0).unwrap();
    let image = render_view(&state, 32, &sheet());
    assert_eq!(image.get_pixel(16, 16), &Rgb([255, 255, 255]));
}

#[test]
fn test_single_tile_rotates_about_center() {
    let engine = PlacementEngine::new(TileCatalog::builtin());
    let log = TileId::from("oak_log");
    let mut state = EditorState::new(GridSize::new(2, 2).unwrap());
    let floor = state.floor_mut(0).unwrap();
    engine.place_block(floor, 0, 0, &log, Rotation::Deg0, false);
    engine.place_block(floor, 1, 0, &log, Rotation::Deg180, false);

    let image = render_floor(state.active_floor(), 32, &sheet());
    // Unrotated: dark on top.
    assert_eq!(image.get_pixel(16, 8), &Rgb([10, 10, 10]));
    assert_eq!(image.get_pixel(16, 24), &Rgb([200, 200, 200]));
    // Half turn: dark at the bottom.
    assert_eq!(image.get_pixel(48, 8), &Rgb([200, 200, 200]));
    assert_eq!(image.get_pixel(48, 24), &Rgb([10, 10, 10]));
}
