use std::collections::VecDeque;

use crate::error::MazeError;
use crate::grids::block_grid::BlockGrid;
use crate::grids::{Cell, Direction};

/// Breadth-first visit order from `start` until `goal` is dequeued.
///
/// Neighbors are admitted to the frontier once: bounds are checked before
/// wall state, and a cell is marked visited the moment it is enqueued, so
/// nothing is ever emitted twice. A drained frontier reports
/// `GoalUnreachable` instead of hanging, and the partial traversal is
/// dropped with it.
pub fn solve(grid: &BlockGrid, start: Cell, goal: Cell) -> Result<Vec<Cell>, MazeError> {
    grid.index_of(goal)?;
    if grid.get(start)?.is_wall() {
        return Err(MazeError::GoalUnreachable);
    }

    let mut frontier: VecDeque<Cell> = VecDeque::new();
    let mut visited = vec![false; grid.cell_count()];
    visited[grid.index_of(start)?] = true;
    frontier.push_back(start);

    let mut order = Vec::new();
    while let Some(cell) = frontier.pop_front() {
        order.push(cell);
        if cell == goal {
            return Ok(order);
        }

        for &dir in Direction::ALL.iter() {
            let next = dir.offset(cell, 1);
            if !grid.in_bounds(next) {
                continue;
            }
            let index = grid.index_of(next)?;
            if grid.get(next)?.is_wall() || visited[index] {
                continue;
            }
            visited[index] = true;
            frontier.push_back(next);
        }
    }

    Err(MazeError::GoalUnreachable)
}
