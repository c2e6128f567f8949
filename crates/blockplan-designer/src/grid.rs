//! Grid store
//!
//! Row-major rectangular cell storage shared by the primary and accessory
//! layers of a floor.

use blockplan_core::{EditorError, Result, Rotation, TileId};

/// Grid dimensions in cells; both even and positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
            return Err(EditorError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Converts signed coordinates to in-bounds cell coordinates.
    pub fn checked(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            Some((x as u32, y as u32))
        } else {
            None
        }
    }
}

/// Role of a cell in a multi-cell placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellPart {
    #[default]
    None,
    /// Placement anchor of a double-cell tile
    Foot,
    /// Extension cell; drawn and counted through its foot
    Head,
}

/// One square of a floor's primary layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub block: Option<TileId>,
    pub rotation: Rotation,
    pub part: CellPart,
}

impl Cell {
    pub fn single(block: TileId, rotation: Rotation) -> Self {
        Self {
            block: Some(block),
            rotation,
            part: CellPart::None,
        }
    }

    pub fn foot(block: TileId, rotation: Rotation) -> Self {
        Self {
            part: CellPart::Foot,
            ..Self::single(block, rotation)
        }
    }

    pub fn head(block: TileId, rotation: Rotation) -> Self {
        Self {
            part: CellPart::Head,
            ..Self::single(block, rotation)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_none()
    }

    /// Whether this cell contributes to block counts.
    pub fn is_counted(&self) -> bool {
        self.block.is_some() && self.part != CellPart::Head
    }

    /// Offset from this cell to the other half of its double-cell tile.
    pub fn partner_offset(&self) -> Option<(i64, i64)> {
        let (dx, dy) = self.rotation.extension_offset();
        match self.part {
            CellPart::None => None,
            CellPart::Foot => Some((dx, dy)),
            CellPart::Head => Some((-dx, -dy)),
        }
    }

    /// Whether `other` is the matching opposite half of this cell.
    pub fn pairs_with(&self, other: &Cell) -> bool {
        let opposite = match self.part {
            CellPart::None => return false,
            CellPart::Foot => CellPart::Head,
            CellPart::Head => CellPart::Foot,
        };
        other.part == opposite && other.block == self.block && other.rotation == self.rotation
    }
}

/// Row-major 2D array, `height` rows of `width` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    size: GridSize,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Creates a grid of default (empty) cells.
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![T::default(); size.cell_count()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.size.width && y < self.size.height {
            Some(y as usize * self.size.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut T> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Writes a cell; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        if let Some(cell) = self.get_mut(x, y) {
            *cell = value;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.size.width as usize)
    }

    /// Iterates `(x, y, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> {
        let width = self.size.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i as u32 % width, i as u32 / width, cell))
    }

    pub fn fill(&mut self, value: T) {
        self.cells.iter_mut().for_each(|cell| *cell = value.clone());
    }

    pub fn clear(&mut self) {
        self.fill(T::default());
    }

    /// Returns a grid of the new size holding the overlapping top-left
    /// region of this one; everything else is empty.
    pub fn resized(&self, size: GridSize) -> Self {
        let mut grid = Self::new(size);
        let width = self.size.width.min(size.width);
        let height = self.size.height.min(size.height);
        for y in 0..height {
            for x in 0..width {
                if let Some(cell) = self.get(x, y) {
                    grid.set(x, y, cell.clone());
                }
            }
        }
        grid
    }
}
