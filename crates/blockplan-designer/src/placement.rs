//! Placement engine
//!
//! Validates and applies single-cell and double-cell placements on a floor.
//! Every check happens before the first write, so a rejected placement never
//! leaves a partially placed tile behind.

use crate::floor::Floor;
use crate::grid::{Cell, Grid};
use blockplan_core::{CellSpan, EditorError, Result, Rotation, TileCatalog, TileId, TileLayer};

/// Why a placement did not change the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Target cell is outside the grid
    OutOfBounds,
    /// Tile is not in the catalog
    UnknownTile,
    /// Tile belongs to the other layer
    WrongLayer,
    /// Head of a double-cell tile would fall outside the grid
    ExtensionOutOfBounds,
    /// Head of a double-cell tile would land on an occupied cell
    ExtensionOccupied,
    /// The cell already holds exactly this
    Unchanged,
}

/// Outcome of a placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Applied,
    Rejected(Rejection),
}

impl Placement {
    pub fn is_applied(&self) -> bool {
        matches!(self, Placement::Applied)
    }
}

/// Applies placements against a tile catalog
#[derive(Debug, Clone, Copy)]
pub struct PlacementEngine<'a> {
    catalog: &'a TileCatalog,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(catalog: &'a TileCatalog) -> Self {
        Self { catalog }
    }

    /// Places or erases a primary-layer tile at `(x, y)`.
    ///
    /// When `erase` is set the tile is ignored and the cell is reset; erasing
    /// either half of a double-cell tile clears both halves.
    pub fn place_block(
        &self,
        floor: &mut Floor,
        x: i64,
        y: i64,
        tile: &TileId,
        rotation: Rotation,
        erase: bool,
    ) -> Placement {
        let Some((x, y)) = floor.size().checked(x, y) else {
            return Placement::Rejected(Rejection::OutOfBounds);
        };
        let grid = &mut floor.grid;

        if erase {
            if grid.get(x, y).is_some_and(|c| *c == Cell::default()) {
                return Placement::Rejected(Rejection::Unchanged);
            }
            clear_with_partner(grid, x, y);
            return Placement::Applied;
        }

        let Some(def) = self.catalog.get(tile) else {
            tracing::debug!("Ignoring unknown tile {}", tile);
            return Placement::Rejected(Rejection::UnknownTile);
        };
        if def.layer != TileLayer::Primary {
            return Placement::Rejected(Rejection::WrongLayer);
        }

        match def.span {
            CellSpan::Single => {
                let cell = Cell::single(tile.clone(), rotation);
                if grid.get(x, y) == Some(&cell) {
                    return Placement::Rejected(Rejection::Unchanged);
                }
                clear_with_partner(grid, x, y);
                grid.set(x, y, cell);
                Placement::Applied
            }
            CellSpan::Double => {
                let (dx, dy) = rotation.extension_offset();
                let Some((hx, hy)) = grid.size().checked(x as i64 + dx, y as i64 + dy) else {
                    tracing::debug!("{} at ({}, {}) {} would leave the grid", tile, x, y, rotation);
                    return Placement::Rejected(Rejection::ExtensionOutOfBounds);
                };
                let foot = Cell::foot(tile.clone(), rotation);
                let head = Cell::head(tile.clone(), rotation);
                if grid.get(x, y) == Some(&foot) && grid.get(hx, hy) == Some(&head) {
                    return Placement::Rejected(Rejection::Unchanged);
                }
                if grid.get(hx, hy).is_some_and(|c| !c.is_empty()) {
                    tracing::debug!("{} at ({}, {}) blocked at ({}, {})", tile, x, y, hx, hy);
                    return Placement::Rejected(Rejection::ExtensionOccupied);
                }
                clear_with_partner(grid, x, y);
                grid.set(x, y, foot);
                grid.set(hx, hy, head);
                Placement::Applied
            }
        }
    }

    /// Places or erases an accessory at `(x, y)`; the primary layer is untouched.
    pub fn place_accessory(
        &self,
        floor: &mut Floor,
        x: i64,
        y: i64,
        tile: &TileId,
        erase: bool,
    ) -> Placement {
        let Some((x, y)) = floor.size().checked(x, y) else {
            return Placement::Rejected(Rejection::OutOfBounds);
        };

        let next = if erase {
            None
        } else {
            let Some(def) = self.catalog.get(tile) else {
                tracing::debug!("Ignoring unknown accessory {}", tile);
                return Placement::Rejected(Rejection::UnknownTile);
            };
            if def.layer != TileLayer::Accessory {
                return Placement::Rejected(Rejection::WrongLayer);
            }
            Some(tile.clone())
        };

        if floor.accessories.get(x, y) == Some(&next) {
            return Placement::Rejected(Rejection::Unchanged);
        }
        floor.accessories.set(x, y, next);
        Placement::Applied
    }

    /// Covers the tile's layer of the whole floor with a single-cell tile.
    pub fn fill(&self, floor: &mut Floor, tile: &TileId) -> Result<()> {
        let def = self.catalog.require(tile)?;
        if def.is_double() {
            return Err(EditorError::DoubleTileFill(tile.to_string()));
        }
        match def.layer {
            TileLayer::Primary => floor.grid.fill(Cell::single(tile.clone(), Rotation::Deg0)),
            TileLayer::Accessory => floor.accessories.fill(Some(tile.clone())),
        }
        Ok(())
    }
}

/// Resets a cell and, if it was half of a double-cell tile, the other half.
fn clear_with_partner(grid: &mut Grid<Cell>, x: u32, y: u32) {
    let Some(cell) = grid.get(x, y).cloned() else {
        return;
    };
    if let Some((dx, dy)) = cell.partner_offset() {
        if let Some((px, py)) = grid.size().checked(x as i64 + dx, y as i64 + dy) {
            if grid.get(px, py).is_some_and(|partner| cell.pairs_with(partner)) {
                grid.set(px, py, Cell::default());
            }
        }
    }
    grid.set(x, y, Cell::default());
}
