use rand::prelude::*;

use crate::error::MazeError;
use crate::generators::Generator;
use crate::grids::block_grid::BlockGrid;
use crate::grids::{Cell, CellKind, Dimensions, Direction};

/// Randomized depth-first backtracker. Passages live on odd coordinates and
/// walls on the even coordinates between them, so carving a step opens two
/// cells: the wall in between and the cell two away.
pub struct Backtracker {
    width: i32,
    height: i32,
    rng: StdRng,
}

struct Frame {
    cell: Cell,
    dirs: [Direction; 4],
    cursor: usize,
}

impl Backtracker {
    pub fn new(width: i32, height: i32) -> Result<Self, MazeError> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Same seed, same maze.
    pub fn with_seed(width: i32, height: i32, seed: u64) -> Result<Self, MazeError> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: i32, height: i32, rng: StdRng) -> Result<Self, MazeError> {
        // odd dimensions keep the goal on the carved lattice; anything
        // smaller than 5 has no interior to carve
        if width < 5 || height < 5 || width % 2 == 0 || height % 2 == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height, rng })
    }

    fn in_interior(&self, cell: Cell) -> bool {
        cell.0 >= 1 && cell.0 <= self.width - 2 && cell.1 >= 1 && cell.1 <= self.height - 2
    }

    fn shuffled_directions(&mut self) -> [Direction; 4] {
        let mut dirs = Direction::ALL;
        dirs.shuffle(&mut self.rng);
        dirs
    }

    fn carve(&mut self, grid: &mut BlockGrid) -> Result<(), MazeError> {
        let start = (1, 1);
        grid.set(start, CellKind::Open)?;

        let dirs = self.shuffled_directions();
        let mut stack = vec![Frame {
            cell: start,
            dirs,
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.cursor >= frame.dirs.len() {
                // every direction tried, backtrack
                stack.pop();
                continue;
            }

            let dir = frame.dirs[frame.cursor];
            frame.cursor += 1;
            let cell = frame.cell;

            let next = dir.offset(cell, 2);
            if !self.in_interior(next) || !grid.get(next)?.is_wall() {
                continue;
            }

            grid.set(dir.offset(cell, 1), CellKind::Open)?;
            grid.set(next, CellKind::Open)?;

            let dirs = self.shuffled_directions();
            stack.push(Frame {
                cell: next,
                dirs,
                cursor: 0,
            });
        }

        Ok(())
    }
}

impl Generator for Backtracker {
    fn generate(&mut self) -> Result<BlockGrid, MazeError> {
        let mut grid = BlockGrid::with_dims(self.width, self.height);
        self.carve(&mut grid)?;

        // one opening through the boundary wall at each end of the maze
        let (start, goal) = self.endpoints();
        grid.set((start.0 - 1, start.1), CellKind::Open)?;
        grid.set((goal.0, goal.1 + 1), CellKind::Open)?;

        Ok(grid)
    }

    fn dims(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    fn endpoints(&self) -> (Cell, Cell) {
        ((1, 1), (self.width - 2, self.height - 2))
    }
}

#[cfg(test)]
mod test_carve {
    use std::collections::HashSet;

    use super::*;

    fn open_cells(grid: &BlockGrid) -> Vec<Cell> {
        let mut open = vec![];
        for y in 0..grid.dims.height {
            for x in 0..grid.dims.width {
                if !grid.get((x, y)).unwrap().is_wall() {
                    open.push((x, y));
                }
            }
        }
        open
    }

    fn reachable_from(grid: &BlockGrid, start: Cell) -> HashSet<Cell> {
        let mut seen = HashSet::new();
        let mut pending = vec![start];
        seen.insert(start);
        while let Some(cell) = pending.pop() {
            for &dir in Direction::ALL.iter() {
                let next = dir.offset(cell, 1);
                if grid.in_bounds(next)
                    && !grid.get(next).unwrap().is_wall()
                    && seen.insert(next)
                {
                    pending.push(next);
                }
            }
        }
        seen
    }

    // undirected adjacencies between open cells, counting right/down only
    fn open_edge_count(grid: &BlockGrid) -> usize {
        let mut edges = 0;
        for &cell in open_cells(grid).iter() {
            for &dir in &[Direction::Right, Direction::Down] {
                let next = dir.offset(cell, 1);
                if grid.in_bounds(next) && !grid.get(next).unwrap().is_wall() {
                    edges += 1;
                }
            }
        }
        edges
    }

    #[test]
    fn rejects_small_or_even_dimensions() {
        for &(w, h) in &[(4, 5), (5, 4), (3, 3), (6, 7), (7, 6), (0, 5)] {
            match Backtracker::with_seed(w, h, 0) {
                Err(MazeError::InvalidDimensions { width, height }) => {
                    assert_eq!((width, height), (w, h));
                }
                _ => panic!("{}x{} should be rejected", w, h),
            }
        }
        assert!(Backtracker::with_seed(5, 5, 0).is_ok());
    }

    #[test]
    fn same_seed_same_maze() {
        let a = Backtracker::with_seed(21, 21, 7).unwrap().generate().unwrap();
        let b = Backtracker::with_seed(21, 21, 7).unwrap().generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn successive_calls_differ() {
        let mut gen = Backtracker::with_seed(21, 21, 7).unwrap();
        let first = gen.generate().unwrap();
        let second = gen.generate().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn carves_a_spanning_tree() {
        for &(w, h, seed) in &[(5, 5, 0), (9, 13, 1), (21, 21, 2), (31, 17, 3)] {
            let grid = Backtracker::with_seed(w, h, seed).unwrap().generate().unwrap();
            let open = open_cells(&grid);
            let reached = reachable_from(&grid, (1, 1));

            // connected: everything open hangs off the start cell
            assert_eq!(reached.len(), open.len(), "{}x{} seed {}", w, h, seed);
            // acyclic: a connected graph with V-1 edges is a tree, which is
            // what gives exactly one path between any two open cells
            assert_eq!(open_edge_count(&grid), open.len() - 1, "{}x{} seed {}", w, h, seed);
        }
    }

    #[test]
    fn endpoints_are_open_and_connected() {
        for seed in 0..8 {
            let mut gen = Backtracker::with_seed(13, 9, seed).unwrap();
            let (start, goal) = gen.endpoints();
            let grid = gen.generate().unwrap();

            assert!(!grid.get(start).unwrap().is_wall());
            assert!(!grid.get(goal).unwrap().is_wall());
            assert!(reachable_from(&grid, start).contains(&goal));
        }
    }

    #[test]
    fn boundary_stays_walled_except_openings() {
        let mut gen = Backtracker::with_seed(11, 11, 4).unwrap();
        let (start, goal) = gen.endpoints();
        let grid = gen.generate().unwrap();
        let openings = [(start.0 - 1, start.1), (goal.0, goal.1 + 1)];

        for y in 0..11 {
            for x in 0..11 {
                if x != 0 && x != 10 && y != 0 && y != 10 {
                    continue;
                }
                let expect_open = openings.contains(&(x, y));
                assert_eq!(!grid.get((x, y)).unwrap().is_wall(), expect_open, "at {:?}", (x, y));
            }
        }
    }

    #[test]
    fn five_by_five_scenario() {
        let grid = Backtracker::with_seed(5, 5, 42).unwrap().generate().unwrap();

        assert!(grid.get((0, 0)).unwrap().is_wall());
        assert!(!grid.get((1, 1)).unwrap().is_wall());
        assert!(!grid.get((3, 3)).unwrap().is_wall());
        assert!(reachable_from(&grid, (1, 1)).contains(&(3, 3)));
    }
}
