//! Tool selection and placement through the designer state.

use super::FloorplanState;
use crate::placement::{Placement, PlacementEngine};
use blockplan_core::{Result, Rotation, TileCatalog, TileId, TileLayer};

/// The tile and rotation currently painted by the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSelection {
    pub tile: TileId,
    pub rotation: Rotation,
    pub layer: TileLayer,
}

impl ToolSelection {
    pub fn new(catalog: &TileCatalog, tile: TileId) -> Result<Self> {
        let layer = catalog.require(&tile)?.layer;
        Ok(Self {
            tile,
            rotation: Rotation::Deg0,
            layer,
        })
    }
}

impl FloorplanState {
    pub fn tool(&self) -> &ToolSelection {
        &self.tool
    }

    /// Selects the tile to paint; accessory tiles paint the accessory layer.
    pub fn select_tile(&mut self, tile: TileId) -> Result<()> {
        let layer = self.catalog.require(&tile)?.layer;
        self.tool.tile = tile;
        self.tool.layer = layer;
        Ok(())
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.tool.rotation = rotation;
    }

    /// Cycles the placement rotation by +90 degrees.
    pub fn rotate_tool(&mut self) -> Rotation {
        self.tool.rotation = self.tool.rotation.next();
        self.tool.rotation
    }

    /// Paints the current tool at a cell of the active floor.
    pub fn place_at(&mut self, x: i64, y: i64) -> Placement {
        self.tool_action(x, y, false)
    }

    /// Erases the current tool's layer at a cell of the active floor.
    pub fn erase_at(&mut self, x: i64, y: i64) -> Placement {
        self.tool_action(x, y, true)
    }

    fn tool_action(&mut self, x: i64, y: i64, erase: bool) -> Placement {
        let before = self.state.clone();
        let outcome = self.apply_tool(x, y, erase);
        if outcome.is_applied() {
            self.commit(before);
        }
        outcome
    }

    /// Applies the tool without touching history; strokes record their own
    /// snapshot.
    pub(crate) fn apply_tool(&mut self, x: i64, y: i64, erase: bool) -> Placement {
        let engine = PlacementEngine::new(&self.catalog);
        let floor = self.state.active_floor_mut();
        match self.tool.layer {
            TileLayer::Primary => {
                engine.place_block(floor, x, y, &self.tool.tile, self.tool.rotation, erase)
            }
            TileLayer::Accessory => engine.place_accessory(floor, x, y, &self.tool.tile, erase),
        }
    }

    /// Places or erases a primary-layer tile on any floor.
    pub fn place_block(
        &mut self,
        floor: usize,
        x: i64,
        y: i64,
        tile: &TileId,
        rotation: Rotation,
        erase: bool,
    ) -> Result<Placement> {
        let before = self.state.clone();
        let engine = PlacementEngine::new(&self.catalog);
        let outcome = engine.place_block(self.state.floor_mut(floor)?, x, y, tile, rotation, erase);
        if outcome.is_applied() {
            self.commit(before);
        }
        Ok(outcome)
    }

    /// Places or erases an accessory on any floor.
    pub fn place_accessory(
        &mut self,
        floor: usize,
        x: i64,
        y: i64,
        tile: &TileId,
        erase: bool,
    ) -> Result<Placement> {
        let before = self.state.clone();
        let engine = PlacementEngine::new(&self.catalog);
        let outcome = engine.place_accessory(self.state.floor_mut(floor)?, x, y, tile, erase);
        if outcome.is_applied() {
            self.commit(before);
        }
        Ok(outcome)
    }
}
