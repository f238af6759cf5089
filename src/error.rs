use std::io;

use thiserror::Error;

use crate::grids::Cell;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("cell {cell:?} is outside the grid")]
    OutOfBounds { cell: Cell },

    #[error("{width}x{height} grid is too small to carve; dimensions must be odd and at least 5")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("frontier drained before reaching the goal")]
    GoalUnreachable,

    #[error("renderer call failed")]
    Collaborator(#[from] io::Error),

    #[error("renderer rejected the request: {0}")]
    Rejected(String),
}
