use blockplan_core::{EditorError, TileCatalog, TileId};
use blockplan_designer::{FloorplanState, GridSize};
use std::sync::Arc;

fn designer() -> FloorplanState {
    FloorplanState::new(
        Arc::new(TileCatalog::standard()),
        GridSize::new(4, 4).unwrap(),
        20,
        TileId::from("stone"),
    )
    .unwrap()
}

#[test]
fn test_deleting_only_floor_is_refused() {
    let mut d = designer();
    let err = d.delete_floor(0).unwrap_err();
    assert!(matches!(err, EditorError::LastFloor));
    assert_eq!(d.state().floor_count(), 1);
    assert!(!d.can_undo());
}

#[test]
fn test_delete_moves_active_down() {
    let mut d = designer();
    d.add_floor();
    d.add_floor();
    assert_eq!(d.state().active_index(), 2);
    d.delete_floor(2).unwrap();
    assert_eq!(d.state().active_index(), 1);
    d.set_active_floor(0).unwrap();
    d.delete_floor(0).unwrap();
    assert_eq!(d.state().active_index(), 0);
    assert_eq!(d.state().floor_count(), 1);
}

#[test]
fn test_hidden_floors_leave_counts() {
    let mut d = designer();
    d.place_at(0, 0);
    d.add_floor();
    d.place_at(0, 0);
    d.place_at(1, 0);
    assert_eq!(d.visible_counts().get(&TileId::from("stone")), 3);

    d.set_floor_visible(1, false).unwrap();
    assert_eq!(d.visible_counts().get(&TileId::from("stone")), 1);
    assert_eq!(d.active_counts().get(&TileId::from("stone")), 2);

    d.set_floor_visible(0, false).unwrap();
    assert!(d.count_labels().is_empty());
}

#[test]
fn test_move_floor_carries_contents() {
    let mut d = designer();
    d.place_at(3, 3);
    d.add_floor();
    d.rename_floor(1, "Attic").unwrap();

    assert_eq!(d.move_floor_down(1).unwrap(), 0);
    assert_eq!(d.state().floor_name(0).unwrap(), "Attic");
    assert_eq!(d.state().active_index(), 0);
    assert!(d.state().floors()[0].is_blank());
    assert!(!d.state().floors()[1].is_blank());

    assert_eq!(d.move_floor_down(0).unwrap(), 0);
    assert_eq!(d.move_floor_up(0).unwrap(), 1);
    assert_eq!(d.state().floor_name(1).unwrap(), "Attic");
}

#[test]
fn test_default_and_blank_names() {
    let mut d = designer();
    d.add_floor();
    assert_eq!(d.state().floor_name(1).unwrap(), "Floor 2");
    d.rename_floor(1, "  Basement ").unwrap();
    assert_eq!(d.state().floor_name(1).unwrap(), "Basement");
    d.rename_floor(1, "   ").unwrap();
    assert_eq!(d.state().floor_name(1).unwrap(), "Floor 2");
}

#[test]
fn test_resize_applies_to_every_floor() {
    let mut d = designer();
    d.place_at(3, 3);
    d.add_floor();
    d.place_at(1, 1);

    d.apply_dimensions(2, 2).unwrap();
    for floor in d.state().floors() {
        assert_eq!(floor.size(), GridSize::new(2, 2).unwrap());
    }
    assert!(d.state().floors()[0].is_blank());
    assert_eq!(d.active_counts().total(), 1);

    assert!(matches!(
        d.apply_dimensions(3, 2),
        Err(EditorError::InvalidDimensions { .. })
    ));
    assert_eq!(d.state().size(), GridSize::new(2, 2).unwrap());
}

#[test]
fn test_shrink_then_grow_leaves_new_cells_empty() {
    let mut d = designer();
    d.place_at(0, 0);
    d.place_at(3, 3);
    assert_eq!(d.active_counts().total(), 2);

    d.apply_dimensions(2, 2).unwrap();
    d.apply_dimensions(4, 4).unwrap();
    let floor = d.state().active_floor();
    assert_eq!(floor.size(), GridSize::new(4, 4).unwrap());
    assert!(floor.grid.get(3, 3).unwrap().is_empty());
    assert!(!floor.grid.get(0, 0).unwrap().is_empty());
    assert_eq!(d.active_counts().total(), 1);
}

#[test]
fn test_resize_drops_split_double_tile() {
    let mut d = designer();
    d.select_tile(TileId::from("bed")).unwrap();
    d.place_at(1, 0);
    d.apply_dimensions(2, 2).unwrap();
    assert!(d.state().active_floor().is_blank());
}

#[test]
fn test_fill_and_clear() {
    let mut d = designer();
    d.fill_active().unwrap();
    assert_eq!(d.active_counts().get(&TileId::from("stone")), 16);

    d.select_tile(TileId::from("bed")).unwrap();
    assert!(matches!(d.fill_active(), Err(EditorError::DoubleTileFill(_))));

    d.clear_active();
    assert!(d.state().active_floor().is_blank());
    assert_eq!(d.undo_depth(), 2);
}

#[test]
fn test_repeated_fill_records_once() {
    let mut d = designer();
    d.fill_active().unwrap();
    d.fill_active().unwrap();
    assert_eq!(d.undo_depth(), 1);

    assert!(d.undo());
    assert!(d.state().active_floor().is_blank());
    assert!(!d.can_undo());
}
