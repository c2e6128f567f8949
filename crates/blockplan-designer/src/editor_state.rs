//! Editor state and floor management.
//!
//! [`EditorState`] is the unit of undo/redo: the ordered floors, the active
//! floor index and the shared grid size. Cloning it is a deep copy.

use crate::floor::Floor;
use crate::grid::GridSize;
use blockplan_core::{EditorError, Result};

/// All editable state of one building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    floors: Vec<Floor>,
    active: usize,
    size: GridSize,
}

impl EditorState {
    /// Creates a building with one empty floor.
    pub fn new(size: GridSize) -> Self {
        Self {
            floors: vec![Floor::new(size)],
            active: 0,
            size,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn floor(&self, index: usize) -> Result<&Floor> {
        let count = self.floors.len();
        self.floors
            .get(index)
            .ok_or(EditorError::FloorOutOfRange { index, count })
    }

    pub fn floor_mut(&mut self, index: usize) -> Result<&mut Floor> {
        let count = self.floors.len();
        self.floors
            .get_mut(index)
            .ok_or(EditorError::FloorOutOfRange { index, count })
    }

    pub fn active_floor(&self) -> &Floor {
        &self.floors[self.active]
    }

    pub fn active_floor_mut(&mut self) -> &mut Floor {
        &mut self.floors[self.active]
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.floors.len() {
            Ok(())
        } else {
            Err(EditorError::FloorOutOfRange {
                index,
                count: self.floors.len(),
            })
        }
    }

    /// Appends an empty floor and makes it active; returns its index.
    pub fn add_floor(&mut self) -> usize {
        self.floors.push(Floor::new(self.size));
        self.active = self.floors.len() - 1;
        self.active
    }

    /// Removes a floor. The active index moves to `max(0, active - 1)`.
    pub fn delete_floor(&mut self, index: usize) -> Result<Floor> {
        self.check_index(index)?;
        if self.floors.len() == 1 {
            return Err(EditorError::LastFloor);
        }
        let removed = self.floors.remove(index);
        self.active = self.active.saturating_sub(1).min(self.floors.len() - 1);
        Ok(removed)
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.active = index;
        Ok(())
    }

    /// Activates the floor below; false when already on the first floor.
    pub fn previous_floor(&mut self) -> bool {
        if self.active > 0 {
            self.active -= 1;
            true
        } else {
            false
        }
    }

    /// Activates the floor above; false when already on the last floor.
    pub fn next_floor(&mut self) -> bool {
        if self.active + 1 < self.floors.len() {
            self.active += 1;
            true
        } else {
            false
        }
    }

    /// Exchanges two floors' full records. The active index follows the
    /// floor it pointed at.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.floors.swap(i, j);
        if self.active == i {
            self.active = j;
        } else if self.active == j {
            self.active = i;
        }
        Ok(())
    }

    /// Moves a floor one position up the stack (towards the last index).
    ///
    /// Returns the floor's new index; the top floor stays where it is.
    pub fn move_floor_up(&mut self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        if index + 1 == self.floors.len() {
            return Ok(index);
        }
        self.swap(index, index + 1)?;
        Ok(index + 1)
    }

    /// Moves a floor one position down the stack (towards index 0).
    pub fn move_floor_down(&mut self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(0);
        }
        self.swap(index, index - 1)?;
        Ok(index - 1)
    }

    pub fn set_visible(&mut self, index: usize, visible: bool) -> Result<()> {
        self.floor_mut(index)?.visible = visible;
        Ok(())
    }

    /// Sets a floor's name; blank text restores the default name.
    pub fn rename(&mut self, index: usize, name: &str) -> Result<()> {
        let name = name.trim();
        self.floor_mut(index)?.name = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
        Ok(())
    }

    /// Display name of a floor, `"Floor {index+1}"` when unnamed.
    pub fn floor_name(&self, index: usize) -> Result<String> {
        Ok(self.floor(index)?.display_name(index))
    }

    /// Resizes every floor. Dimensions are validated before any floor changes.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let size = GridSize::new(width, height)?;
        self.floors = self.floors.iter().map(|f| f.resized(size)).collect();
        self.size = size;
        Ok(())
    }
}
