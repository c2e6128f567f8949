//! Floor management, resize, fill and clear.

use super::FloorplanState;
use crate::placement::PlacementEngine;
use blockplan_core::Result;

impl FloorplanState {
    /// Appends an empty floor and switches to it.
    pub fn add_floor(&mut self) -> usize {
        let before = self.state.clone();
        let index = self.state.add_floor();
        self.commit(before);
        tracing::info!("Added floor {}", index + 1);
        index
    }

    /// Deletes a floor; the last remaining floor cannot be deleted.
    pub fn delete_floor(&mut self, index: usize) -> Result<()> {
        let before = self.state.clone();
        self.state.delete_floor(index)?;
        self.commit(before);
        tracing::info!("Deleted floor {}", index + 1);
        Ok(())
    }

    /// Switches the active floor. Navigation is not recorded in history.
    pub fn set_active_floor(&mut self, index: usize) -> Result<()> {
        self.stroke = None;
        self.state.set_active(index)
    }

    pub fn next_floor(&mut self) -> bool {
        self.stroke = None;
        self.state.next_floor()
    }

    pub fn previous_floor(&mut self) -> bool {
        self.stroke = None;
        self.state.previous_floor()
    }

    pub fn swap_floors(&mut self, i: usize, j: usize) -> Result<()> {
        let before = self.state.clone();
        self.state.swap(i, j)?;
        if i != j {
            self.commit(before);
        }
        Ok(())
    }

    /// Moves a floor one step up the stack; returns its new index.
    pub fn move_floor_up(&mut self, index: usize) -> Result<usize> {
        let before = self.state.clone();
        let moved = self.state.move_floor_up(index)?;
        if moved != index {
            self.commit(before);
        }
        Ok(moved)
    }

    /// Moves a floor one step down the stack; returns its new index.
    pub fn move_floor_down(&mut self, index: usize) -> Result<usize> {
        let before = self.state.clone();
        let moved = self.state.move_floor_down(index)?;
        if moved != index {
            self.commit(before);
        }
        Ok(moved)
    }

    pub fn set_floor_visible(&mut self, index: usize, visible: bool) -> Result<()> {
        if self.state.floor(index)?.visible == visible {
            return Ok(());
        }
        let before = self.state.clone();
        self.state.set_visible(index, visible)?;
        self.commit(before);
        Ok(())
    }

    pub fn rename_floor(&mut self, index: usize, name: &str) -> Result<()> {
        let before = self.state.clone();
        self.state.rename(index, name)?;
        if self.state != before {
            self.commit(before);
        }
        Ok(())
    }

    /// Applies the dimension controls to every floor.
    ///
    /// Odd or zero dimensions are rejected and leave the grid unchanged.
    pub fn apply_dimensions(&mut self, width: u32, height: u32) -> Result<()> {
        let before = self.state.clone();
        if let Err(err) = self.state.resize(width, height) {
            tracing::warn!("Rejected grid size {}x{}: {}", width, height, err);
            return Err(err);
        }
        self.stroke = None;
        self.commit(before);
        tracing::info!("Resized grid to {}x{}", width, height);
        Ok(())
    }

    /// Covers the active floor with the current tile.
    pub fn fill_active(&mut self) -> Result<()> {
        let before = self.state.clone();
        let engine = PlacementEngine::new(&self.catalog);
        engine.fill(self.state.active_floor_mut(), &self.tool.tile)?;
        if self.state != before {
            self.commit(before);
        }
        Ok(())
    }

    /// Empties both layers of the active floor.
    pub fn clear_active(&mut self) {
        if self.state.active_floor().is_blank() {
            return;
        }
        let before = self.state.clone();
        self.state.active_floor_mut().clear();
        self.commit(before);
    }
}
