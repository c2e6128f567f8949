use blockplan_core::{Rotation, TileCatalog, TileId};
use blockplan_designer::{
    Compositor, EditorState, ExportError, ExportHeader, ExportLayout, GridSize, PlacementEngine,
    SpriteSheet, Typesetter,
};
use image::{Rgb, Rgba, RgbaImage};

const RED: [u8; 3] = [220, 20, 20];
const BLUE: [u8; 3] = [20, 20, 220];
const GREEN: [u8; 3] = [20, 200, 20];
const YELLOW: [u8; 3] = [240, 220, 10];

fn solid(color: [u8; 3]) -> RgbaImage {
    let [r, g, b] = color;
    RgbaImage::from_pixel(4, 4, Rgba([r, g, b, 255]))
}

fn sprites() -> SpriteSheet {
    let mut sheet = SpriteSheet::new();
    sheet.insert(TileId::from("stone"), &solid(RED));
    sheet.insert(TileId::from("torch"), &solid(YELLOW));
    // Two-cell sprite: foot half blue, head half green.
    let mut bed = RgbaImage::new(2, 1);
    bed.put_pixel(0, 0, Rgba([BLUE[0], BLUE[1], BLUE[2], 255]));
    bed.put_pixel(1, 0, Rgba([GREEN[0], GREEN[1], GREEN[2], 255]));
    sheet.insert(TileId::from("bed"), &bed);
    sheet
}

fn building(floors: usize) -> EditorState {
    let mut state = EditorState::new(GridSize::new(4, 4).unwrap());
    for _ in 1..floors {
        state.add_floor();
    }
    state
}

fn place(state: &mut EditorState, floor: usize, x: i64, y: i64, tile: &str, rotation: Rotation) {
    let engine = PlacementEngine::new(TileCatalog::builtin());
    let outcome = engine.place_block(
        state.floor_mut(floor).unwrap(),
        x,
        y,
        &TileId::from(tile),
        rotation,
        false,
    );
    assert!(outcome.is_applied(), "{tile} at ({x}, {y})");
}

fn compose(state: &EditorState, sheet: &SpriteSheet) -> image::RgbImage {
    Compositor::new(
        ExportLayout::default(),
        TileCatalog::builtin(),
        sheet,
        Typesetter::fallback(),
    )
    .compose(state, &ExportHeader::new("Ada", "Tower"))
    .unwrap()
}

#[test]
fn test_two_floor_dimensions() {
    let state = building(2);
    let image = compose(&state, &SpriteSheet::new());
    assert_eq!(image.dimensions(), (316, 278));
}

#[test]
fn test_three_floors_wrap_to_second_row() {
    let state = building(3);
    let image = compose(&state, &SpriteSheet::new());
    assert_eq!(image.dimensions(), (316, 486));
}

#[test]
fn test_single_floor_uses_one_column() {
    let state = building(1);
    let image = compose(&state, &SpriteSheet::new());
    assert_eq!(image.dimensions(), (168, 278));
}

#[test]
fn test_tiles_grid_and_panel_colors() {
    let mut state = building(2);
    place(&mut state, 0, 0, 0, "stone", Rotation::Deg0);
    let image = compose(&state, &sprites());

    // Page background between panels.
    assert_eq!(image.get_pixel(5, 100), &Rgb([255, 255, 255]));
    // Label band of the first panel.
    assert_eq!(image.get_pixel(100, 75), &Rgb([0xf7, 0xf7, 0xf7]));
    // Tile area starts below the 60px label band.
    assert_eq!(image.get_pixel(36, 146), &Rgb(RED));
    assert_eq!(image.get_pixel(52, 140), &Rgb([0xcc, 0xcc, 0xcc]));
    // Empty cell shows the panel color.
    assert_eq!(image.get_pixel(80, 180), &Rgb([0xf7, 0xf7, 0xf7]));
    // Panel border.
    assert_eq!(image.get_pixel(20, 100), &Rgb([0xbb, 0xbb, 0xbb]));
}

#[test]
fn test_hidden_floors_are_exported() {
    let mut state = building(2);
    place(&mut state, 1, 0, 0, "stone", Rotation::Deg0);
    state.set_visible(1, false).unwrap();
    let image = compose(&state, &sprites());
    // Second panel starts at x = 20 + 128 + 20.
    assert_eq!(image.get_pixel(184, 146), &Rgb(RED));
}

#[test]
fn test_double_tile_spans_towards_head() {
    // (foot, head) tile centers for each rotation on a 4x4 grid.
    let cases = [
        (Rotation::Deg0, (0, 0), (36, 146), (68, 146)),
        (Rotation::Deg90, (0, 0), (36, 146), (36, 178)),
        (Rotation::Deg180, (1, 0), (68, 146), (36, 146)),
        (Rotation::Deg270, (0, 1), (36, 178), (36, 146)),
    ];
    for (rotation, (x, y), foot, head) in cases {
        let mut state = building(1);
        place(&mut state, 0, x, y, "bed", rotation);
        let image = compose(&state, &sprites());
        assert_eq!(image.get_pixel(foot.0, foot.1), &Rgb(BLUE), "foot at {rotation}");
        assert_eq!(image.get_pixel(head.0, head.1), &Rgb(GREEN), "head at {rotation}");
    }
}

#[test]
fn test_accessories_drawn_over_blocks() {
    let mut state = building(1);
    place(&mut state, 0, 2, 2, "stone", Rotation::Deg0);
    let engine = PlacementEngine::new(TileCatalog::builtin());
    let floor = state.floor_mut(0).unwrap();
    assert!(engine
        .place_accessory(floor, 2, 2, &TileId::from("torch"), false)
        .is_applied());

    let image = compose(&state, &sprites());
    assert_eq!(image.get_pixel(20 + 80, 130 + 80), &Rgb(YELLOW));
}

#[test]
fn test_missing_sprite_leaves_cell_empty() {
    let mut state = building(1);
    place(&mut state, 0, 1, 1, "glass", Rotation::Deg0);
    let image = compose(&state, &sprites());
    assert_eq!(image.get_pixel(68, 178), &Rgb([0xf7, 0xf7, 0xf7]));
}

#[test]
fn test_stats_wrap_to_panel_width() {
    let mut state = building(1);
    for (x, tile) in ["stone", "sand", "glass", "oak_planks"].iter().enumerate() {
        place(&mut state, 0, x as i64, 0, tile, Rotation::Deg0);
    }
    let sheet = SpriteSheet::new();
    let typesetter = Typesetter::fallback();
    let layout = ExportLayout::default();
    let compositor = Compositor::new(layout, TileCatalog::builtin(), &sheet, typesetter);

    let size = state.size();
    let lines = compositor.stats_lines(state.active_floor(), size);
    let max = layout.interior_width(size) as f32;
    assert!(lines.len() > 1);
    for line in &lines {
        assert!(
            !line.contains(" | ") || typesetter.text_width(line, 14.0, false) <= max,
            "{line} overflows"
        );
    }
    assert_eq!(lines.join(" | "), "Stone: 1 | Sand: 1 | Glass: 1 | Oak Planks: 1");
}

#[test]
fn test_label_band_fits_every_stats_line() {
    let mut state = building(2);
    for (x, tile) in ["stone", "sand", "glass", "oak_planks"].iter().enumerate() {
        place(&mut state, 0, x as i64, 0, tile, Rotation::Deg0);
    }
    place(&mut state, 1, 0, 0, "stone", Rotation::Deg0);
    let sheet = sprites();
    let compositor = Compositor::new(
        ExportLayout::default(),
        TileCatalog::builtin(),
        &sheet,
        Typesetter::fallback(),
    );

    let layout = compositor.page_layout(&state);
    let size = state.size();
    for floor in state.floors() {
        let lines = compositor.stats_lines(floor, size).len() as u32;
        // First baseline at 40, then one line every 16px.
        let last_baseline = 40 + lines.saturating_sub(1) * 16;
        assert!(last_baseline < layout.label_height, "{lines} lines in {}", layout.label_height);
    }
    assert_eq!(compositor.stats_lines(&state.floors()[0], size).len(), 4);
    assert_eq!(layout.label_height, 92);

    let image = compositor
        .compose(&state, &ExportHeader::default())
        .unwrap();
    assert_eq!(image.dimensions(), (316, 70 + 92 + 128 + 20));
    // Both panels share the taller band, so tiles start at y = 70 + 92.
    assert_eq!(image.get_pixel(36, 178), &Rgb(RED));
    assert_eq!(image.get_pixel(184, 178), &Rgb(RED));
    assert_eq!(image.get_pixel(36, 150), &Rgb([0xf7, 0xf7, 0xf7]));
}

#[test]
fn test_oversized_export_is_an_error() {
    let state = EditorState::new(GridSize::new(65_536, 2).unwrap());
    let layout = ExportLayout {
        tile_size: 70_000,
        ..ExportLayout::default()
    };
    let sheet = SpriteSheet::new();
    let compositor = Compositor::new(layout, TileCatalog::builtin(), &sheet, Typesetter::fallback());
    let err = compositor
        .export(&state, &ExportHeader::default())
        .unwrap_err();
    assert!(matches!(err, ExportError::TooLarge { tile_size: 70_000, .. }));
}

#[test]
fn test_write_to_dir_stays_inside_directory() {
    let state = building(1);
    let sheet = SpriteSheet::new();
    let compositor = Compositor::new(
        ExportLayout::default(),
        TileCatalog::builtin(),
        &sheet,
        Typesetter::fallback(),
    );
    let artifact = compositor
        .export(&state, &ExportHeader::new("../../escaped", "..\\up"))
        .unwrap();

    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("a").join("b");
    let path = artifact.write_to_dir(&out).unwrap();
    assert_eq!(path.parent().unwrap(), out.as_path());
    assert!(path.exists());
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 1);
}

#[test]
fn test_export_encodes_png() {
    let mut state = building(2);
    place(&mut state, 0, 0, 0, "stone", Rotation::Deg0);
    let before = state.clone();
    let sheet = sprites();
    let compositor = Compositor::new(
        ExportLayout::default(),
        TileCatalog::builtin(),
        &sheet,
        Typesetter::fallback(),
    );

    let artifact = compositor
        .export(&state, &ExportHeader::new("Ada Lovelace", "Tower"))
        .unwrap();
    assert_eq!(artifact.file_name, "Ada_Lovelace_Tower.png");
    assert_eq!((artifact.width, artifact.height), (316, 278));
    assert_eq!(state, before);

    let decoded = image::load_from_memory(&artifact.png).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (316, 278));
    assert_eq!(decoded.get_pixel(36, 146), &Rgb(RED));

    let dir = tempfile::tempdir().unwrap();
    let path = artifact.write_to_dir(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("Ada_Lovelace_Tower.png"));
    assert_eq!(std::fs::read(path).unwrap(), artifact.png);
}
