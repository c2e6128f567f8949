use blockplan_core::{Rotation, TileCatalog, TileId};
use blockplan_designer::{
    CellPart, Floor, GridSize, Placement, PlacementEngine, Rejection,
};

fn floor(w: u32, h: u32) -> Floor {
    Floor::new(GridSize::new(w, h).unwrap())
}

fn bed() -> TileId {
    TileId::from("bed")
}

#[test]
fn test_double_cell_extension_follows_rotation() {
    let engine = PlacementEngine::new(TileCatalog::builtin());
    let expected = [
        (Rotation::Deg0, (3, 2)),
        (Rotation::Deg90, (2, 3)),
        (Rotation::Deg180, (1, 2)),
        (Rotation::Deg270, (2, 1)),
    ];
    for (rotation, (hx, hy)) in expected {
        let mut f = floor(6, 6);
        let outcome = engine.place_block(&mut f, 2, 2, &bed(), rotation, false);
        assert_eq!(outcome, Placement::Applied, "rotation {rotation}");

        let foot = f.grid.get(2, 2).unwrap();
        assert_eq!(foot.block, Some(bed()));
        assert_eq!(foot.part, CellPart::Foot);
        assert_eq!(foot.rotation, rotation);

        let head = f.grid.get(hx, hy).unwrap();
        assert_eq!(head.block, Some(bed()));
        assert_eq!(head.part, CellPart::Head);

        let occupied = f.grid.iter().filter(|(_, _, c)| !c.is_empty()).count();
        assert_eq!(occupied, 2);
    }
}

#[test]
fn test_double_cell_rejected_when_extension_occupied() {
    let engine = PlacementEngine::new(TileCatalog::builtin());
    let stone = TileId::from("stone");
    for rotation in Rotation::ALL {
        let mut f = floor(6, 6);
        let (dx, dy) = rotation.extension_offset();
        engine.place_block(&mut f, 2 + dx, 2 + dy, &stone, Rotation::Deg0, false);
        let before = f.clone();

        let outcome = engine.place_block(&mut f, 2, 2, &bed(), rotation, false);
        assert_eq!(outcome, Placement::Rejected(Rejection::ExtensionOccupied));
        assert_eq!(f, before);
    }
}

#[test]
fn test_double_cell_rejected_at_edges() {
    let engine = PlacementEngine::new(TileCatalog::builtin());
    let cases = [
        (Rotation::Deg0, (3, 0)),
        (Rotation::Deg90, (0, 3)),
        (Rotation::Deg180, (0, 0)),
        (Rotation::Deg270, (0, 0)),
    ];
    for (rotation, (x, y)) in cases {
        let mut f = floor(4, 4);
        let outcome = engine.place_block(&mut f, x, y, &bed(), rotation, false);
        assert_eq!(outcome, Placement::Rejected(Rejection::ExtensionOutOfBounds));
        assert!(f.is_blank());
    }
}

#[test]
fn test_erasing_either_half_clears_both() {
    let engine = PlacementEngine::new(TileCatalog::builtin());
    let stone = TileId::from("stone");

    let mut f = floor(4, 4);
    engine.place_block(&mut f, 1, 1, &bed(), Rotation::Deg90, false);
    assert!(engine
        .place_block(&mut f, 1, 1, &stone, Rotation::Deg0, true)
        .is_applied());
    assert!(f.is_blank());

    let mut f = floor(4, 4);
    engine.place_block(&mut f, 1, 1, &bed(), Rotation::Deg90, false);
    assert!(engine
        .place_block(&mut f, 1, 2, &stone, Rotation::Deg0, true)
        .is_applied());
    assert!(f.is_blank());
}

#[test]
fn test_erase_resets_rotation() {
    let engine = PlacementEngine::new(TileCatalog::builtin());
    let mut f = floor(2, 2);
    let log = TileId::from("oak_log");
    engine.place_block(&mut f, 0, 0, &log, Rotation::Deg270, false);
    engine.place_block(&mut f, 0, 0, &log, Rotation::Deg0, true);
    let cell = f.grid.get(0, 0).unwrap();
    assert!(cell.is_empty());
    assert_eq!(cell.rotation, Rotation::Deg0);
    assert_eq!(cell.part, CellPart::None);
    assert_eq!(
        engine.place_block(&mut f, 0, 0, &log, Rotation::Deg0, true),
        Placement::Rejected(Rejection::Unchanged)
    );
}

#[test]
fn test_replacing_a_bed_foot_with_new_bed() {
    let engine = PlacementEngine::new(TileCatalog::builtin());
    let mut f = floor(4, 4);
    engine.place_block(&mut f, 1, 1, &bed(), Rotation::Deg0, false);
    // New bed anchored on the old head, pointing down into empty space.
    assert!(engine
        .place_block(&mut f, 2, 1, &bed(), Rotation::Deg90, false)
        .is_applied());
    assert!(f.grid.get(1, 1).unwrap().is_empty());
    assert_eq!(f.grid.get(2, 1).unwrap().part, CellPart::Foot);
    assert_eq!(f.grid.get(2, 2).unwrap().part, CellPart::Head);
}

#[test]
fn test_accessory_layer_is_independent() {
    let engine = PlacementEngine::new(TileCatalog::builtin());
    let mut f = floor(4, 4);
    let stone = TileId::from("stone");
    let torch = TileId::from("torch");

    engine.place_block(&mut f, 0, 0, &stone, Rotation::Deg0, false);
    assert!(engine.place_accessory(&mut f, 0, 0, &torch, false).is_applied());
    assert_eq!(f.grid.get(0, 0).unwrap().block, Some(stone.clone()));
    assert_eq!(f.accessories.get(0, 0), Some(&Some(torch.clone())));

    engine.place_block(&mut f, 0, 0, &stone, Rotation::Deg0, true);
    assert_eq!(f.accessories.get(0, 0), Some(&Some(torch.clone())));

    assert!(engine.place_accessory(&mut f, 0, 0, &torch, true).is_applied());
    assert_eq!(f.accessories.get(0, 0), Some(&None));
    assert_eq!(
        engine.place_accessory(&mut f, 9, 0, &torch, false),
        Placement::Rejected(Rejection::OutOfBounds)
    );
}
