//! A single building level: primary tile grid plus accessory layer.

use crate::grid::{Cell, CellPart, Grid, GridSize};
use blockplan_core::TileId;

/// One floor of the building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floor {
    pub grid: Grid<Cell>,
    pub accessories: Grid<Option<TileId>>,
    pub name: Option<String>,
    pub visible: bool,
}

impl Floor {
    /// Creates an empty, visible, unnamed floor.
    pub fn new(size: GridSize) -> Self {
        Self {
            grid: Grid::new(size),
            accessories: Grid::new(size),
            name: None,
            visible: true,
        }
    }

    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    /// The floor's name, or `"Floor {index+1}"` when unnamed.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Floor {}", index + 1),
        }
    }

    /// Whether neither layer holds anything.
    pub fn is_blank(&self) -> bool {
        self.grid.iter().all(|(_, _, cell)| cell.is_empty())
            && self.accessories.iter().all(|(_, _, a)| a.is_none())
    }

    /// Empties both layers.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.accessories.clear();
    }

    /// Returns this floor at a new size; see [`Grid::resized`].
    ///
    /// Double-cell tiles cut in half by the new edge are removed entirely.
    pub fn resized(&self, size: GridSize) -> Self {
        let mut floor = Self {
            grid: self.grid.resized(size),
            accessories: self.accessories.resized(size),
            name: self.name.clone(),
            visible: self.visible,
        };
        floor.drop_orphaned_halves();
        floor
    }

    fn drop_orphaned_halves(&mut self) {
        let size = self.grid.size();
        let orphans: Vec<(u32, u32)> = self
            .grid
            .iter()
            .filter(|(_, _, cell)| cell.part != CellPart::None)
            .filter(|&(x, y, cell)| {
                let Some((dx, dy)) = cell.partner_offset() else {
                    return false;
                };
                match size.checked(x as i64 + dx, y as i64 + dy) {
                    Some((px, py)) => !self
                        .grid
                        .get(px, py)
                        .is_some_and(|partner| cell.pairs_with(partner)),
                    None => true,
                }
            })
            .map(|(x, y, _)| (x, y))
            .collect();

        for (x, y) in orphans {
            tracing::debug!("Removing half of a double-cell tile cut at ({}, {})", x, y);
            self.grid.set(x, y, Cell::default());
        }
    }
}
