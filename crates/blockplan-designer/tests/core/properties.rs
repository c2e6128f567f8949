use blockplan_core::{Rotation, TileCatalog, TileId};
use blockplan_designer::{CellPart, EditorState, FloorplanState, GridSize};
use proptest::prelude::*;
use std::sync::Arc;

const TILES: [&str; 5] = ["stone", "oak_log", "bed", "glass", "torch"];

type Edit = (i64, i64, usize, usize, bool);

fn edit_sequence() -> impl Strategy<Value = Vec<Edit>> {
    prop::collection::vec((-1i64..7, -1i64..7, 0usize..5, 0usize..4, any::<bool>()), 0..24)
}

fn designer_with(edits: &[Edit]) -> FloorplanState {
    let mut d = FloorplanState::new(
        Arc::new(TileCatalog::standard()),
        GridSize::new(6, 6).unwrap(),
        32,
        TileId::from("stone"),
    )
    .unwrap();
    for &(x, y, tile, rotation, erase) in edits {
        d.select_tile(TileId::from(TILES[tile])).unwrap();
        d.set_rotation(Rotation::ALL[rotation]);
        if erase {
            d.erase_at(x, y);
        } else {
            d.place_at(x, y);
        }
    }
    d
}

proptest! {
    #[test]
    fn double_tiles_always_keep_both_halves(edits in edit_sequence()) {
        let d = designer_with(&edits);
        let grid = &d.state().active_floor().grid;
        for (x, y, cell) in grid.iter() {
            if cell.part == CellPart::None {
                continue;
            }
            let (dx, dy) = cell.partner_offset().unwrap();
            let partner = grid
                .size()
                .checked(x as i64 + dx, y as i64 + dy)
                .and_then(|(px, py)| grid.get(px, py));
            prop_assert!(partner.is_some_and(|p| cell.pairs_with(p)), "orphan at ({}, {})", x, y);
        }
    }

    #[test]
    fn undo_then_redo_round_trips(edits in edit_sequence(), steps in 0usize..30) {
        let mut d = designer_with(&edits);
        let latest = d.state().clone();
        let steps = steps.min(d.undo_depth());
        for _ in 0..steps {
            prop_assert!(d.undo());
        }
        for _ in 0..steps {
            prop_assert!(d.redo());
        }
        prop_assert_eq!(d.state(), &latest);
    }

    #[test]
    fn resize_to_same_size_is_identity(edits in edit_sequence()) {
        let mut d = designer_with(&edits);
        let before = d.state().clone();
        d.apply_dimensions(6, 6).unwrap();
        prop_assert_eq!(d.state(), &before);
    }

    #[test]
    fn counts_match_grid_contents(edits in edit_sequence()) {
        let d = designer_with(&edits);
        let floor = d.state().active_floor();
        let counted = floor.grid.iter().filter(|(_, _, c)| c.is_counted()).count();
        prop_assert_eq!(d.visible_counts().total(), counted);
    }

    #[test]
    fn swapping_twice_is_identity(floors in 1usize..6, a in 0usize..6, b in 0usize..6, active in 0usize..6) {
        let mut state = EditorState::new(GridSize::new(2, 2).unwrap());
        for _ in 1..floors {
            state.add_floor();
        }
        for i in 0..floors {
            state.rename(i, &format!("Level {i}")).unwrap();
        }
        state.set_active(active % floors).unwrap();
        let before = state.clone();
        let (i, j) = (a % floors, b % floors);
        state.swap(i, j).unwrap();
        state.swap(i, j).unwrap();
        prop_assert_eq!(state, before);
    }
}
