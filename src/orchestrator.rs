use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::error::MazeError;
use crate::generators::Generator;
use crate::grids::block_grid::BlockGrid;
use crate::grids::Cell;
use crate::renderer::{BlockKind, BlockRenderer};
use crate::solvers::bfs;

/// Delays between remote calls, purely so the animation is watchable.
/// Zero everything for tests.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// between placed blocks while drawing the maze
    pub block_delay: Duration,
    /// between visited markers while solving
    pub solve_delay: Duration,
    /// between cleared columns at the end of a cycle
    pub sweep_delay: Duration,
    /// after the goal is reached, before tearing down
    pub cycle_pause: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            block_delay: Duration::from_millis(5),
            solve_delay: Duration::from_millis(40),
            sweep_delay: Duration::from_millis(5),
            cycle_pause: Duration::from_millis(1500),
        }
    }
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            block_delay: Duration::from_millis(0),
            solve_delay: Duration::from_millis(0),
            sweep_delay: Duration::from_millis(0),
            cycle_pause: Duration::from_millis(0),
        }
    }
}

/// Drives the repeating show: clear the stage, carve a maze, draw it block
/// by block, watch the search find the goal, then sweep it all away.
pub struct Orchestrator<R: BlockRenderer> {
    pub renderer: R,
    pub generator: Box<dyn Generator>,
    pub pacing: Pacing,
}

impl<R: BlockRenderer> Orchestrator<R> {
    pub fn new(renderer: R, generator: Box<dyn Generator>, pacing: Pacing) -> Self {
        Self {
            renderer,
            generator,
            pacing,
        }
    }

    /// Run `cycles` full cycles, or forever when `None`. A failed cycle is
    /// logged and the next one starts over with a fresh maze; nothing from
    /// the aborted cycle is reused.
    pub fn run(&mut self, cycles: Option<u64>) {
        let mut completed = 0u64;
        loop {
            match self.cycle() {
                Ok(()) => info!("cycle finished"),
                Err(e) => warn!("cycle aborted: {}", e),
            }
            completed += 1;
            if let Some(limit) = cycles {
                if completed >= limit {
                    break;
                }
            }
        }
    }

    pub fn cycle(&mut self) -> Result<(), MazeError> {
        let dims = self.generator.dims();
        let max = (dims.width - 1, dims.height - 1);

        // wipe whatever a previous cycle left standing, aborted ones included
        self.renderer.clear_region((0, 0), max)?;

        let maze = self.generator.generate()?;
        self.render_maze(&maze)?;

        let (start, goal) = self.generator.endpoints();
        let visits = bfs::solve(&maze, start, goal)?;
        info!("goal {:?} reached after {} visits", goal, visits.len());
        for &cell in &visits {
            self.renderer.place_block(cell, BlockKind::Marker)?;
            thread::sleep(self.pacing.solve_delay);
        }

        thread::sleep(self.pacing.cycle_pause);
        self.sweep_clear(max)
    }

    /// Floor plane first, then the walls on top of it, one block per call so
    /// the world never shows a half-updated cell.
    fn render_maze(&mut self, maze: &BlockGrid) -> Result<(), MazeError> {
        for y in 0..maze.dims.height {
            for x in 0..maze.dims.width {
                self.renderer.place_block((x, y), BlockKind::Floor)?;
                thread::sleep(self.pacing.block_delay);
            }
        }
        for y in 0..maze.dims.height {
            for x in 0..maze.dims.width {
                if maze.get((x, y))?.is_wall() {
                    self.renderer.place_block((x, y), BlockKind::Wall)?;
                    thread::sleep(self.pacing.block_delay);
                }
            }
        }
        Ok(())
    }

    // column by column, left to right
    fn sweep_clear(&mut self, max: Cell) -> Result<(), MazeError> {
        for x in 0..=max.0 {
            self.renderer.clear_region((x, 0), (x, max.1))?;
            thread::sleep(self.pacing.sweep_delay);
        }
        Ok(())
    }
}
