use std::time::Duration;

use anyhow::Context;
use clap::Parser;

mod error;
mod generators;
mod grids;
mod orchestrator;
mod renderer;
mod solvers;

use generators::backtracker::Backtracker;
use orchestrator::{Orchestrator, Pacing};
use renderer::VoxelClient;

/// Carves a maze into a voxel world, then watches a breadth-first search
/// feel its way to the exit, over and over.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells; odd, at least 5
    #[arg(long, default_value_t = 21)]
    width: i32,

    /// Maze height in cells; odd, at least 5
    #[arg(long, default_value_t = 21)]
    height: i32,

    /// Address of the voxel world service
    #[arg(long, default_value = "127.0.0.1:3333")]
    addr: String,

    /// Random seed; omit for a different maze every run
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between placed blocks while drawing, in milliseconds
    #[arg(long, default_value_t = 5)]
    block_delay_ms: u64,

    /// Delay between visited markers while solving, in milliseconds
    #[arg(long, default_value_t = 40)]
    solve_delay_ms: u64,

    /// Pause after the goal is reached, in milliseconds
    #[arg(long, default_value_t = 1500)]
    pause_ms: u64,

    /// Stop after this many cycles; omit to run until interrupted
    #[arg(long)]
    cycles: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let generator = match args.seed {
        Some(seed) => Backtracker::with_seed(args.width, args.height, seed)?,
        None => Backtracker::new(args.width, args.height)?,
    };

    let client = VoxelClient::connect(&args.addr)
        .with_context(|| format!("connecting to voxel world at {}", args.addr))?;

    let pacing = Pacing {
        block_delay: Duration::from_millis(args.block_delay_ms),
        solve_delay: Duration::from_millis(args.solve_delay_ms),
        cycle_pause: Duration::from_millis(args.pause_ms),
        ..Pacing::default()
    };

    Orchestrator::new(client, Box::new(generator), pacing).run(args.cycles);
    Ok(())
}
