use crate::error::MazeError;
use crate::grids::{Cell, CellKind, Dimensions};

/// Occupancy model of one maze: every cell is either a wall or open floor.
/// Starts fully walled; the generator carves passages, after which the grid
/// is only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGrid {
    pub dims: Dimensions,
    cells: Vec<CellKind>,
}

impl BlockGrid {
    pub fn with_dims(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0);
        Self {
            cells: vec![CellKind::Wall; (width * height) as usize],
            dims: Dimensions { width, height },
        }
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.0 >= 0 && cell.0 < self.dims.width && cell.1 >= 0 && cell.1 < self.dims.height
    }

    /// Row-major index of a cell, shared with the solver's visit set.
    pub fn index_of(&self, cell: Cell) -> Result<usize, MazeError> {
        if self.in_bounds(cell) {
            Ok((cell.1 * self.dims.width + cell.0) as usize)
        } else {
            Err(MazeError::OutOfBounds { cell })
        }
    }

    pub fn get(&self, cell: Cell) -> Result<CellKind, MazeError> {
        self.index_of(cell).map(|i| self.cells[i])
    }

    // returns the kind that was replaced
    pub fn set(&mut self, cell: Cell, kind: CellKind) -> Result<CellKind, MazeError> {
        let i = self.index_of(cell)?;
        let prev = self.cells[i];
        self.cells[i] = kind;
        Ok(prev)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
