pub mod backtracker;

use crate::error::MazeError;
use crate::grids::block_grid::BlockGrid;
use crate::grids::{Cell, Dimensions};

pub trait Generator {
    /// Carve a fresh maze. Repeated calls keep drawing from the same RNG
    /// stream, so every cycle gets a different layout.
    fn generate(&mut self) -> Result<BlockGrid, MazeError>;

    fn dims(&self) -> Dimensions;

    /// Start and goal cells this generator guarantees are open and connected.
    fn endpoints(&self) -> (Cell, Cell);
}
