/*
 * Boid Flocking Simulation - Headless Runner
 *
 * Runs the flock for a fixed number of ticks without a window and logs
 * flock statistics along the way. Useful for tuning parameters and for
 * checking that a config file is valid before opening the viewer.
 */

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use flocking::config::load_params;
use flocking::logging::init_logging;
use flocking::{FlockParams, FlockStats, FlockWorld};

#[derive(Parser, Debug)]
#[command(
    name = "flocking",
    version,
    about = "Run the flocking simulation headless and log flock statistics"
)]
struct Cli {
    /// RON file with flock parameters; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of fixed ticks to simulate.
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Seed for spawning; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of boids; overrides the config file.
    #[arg(long)]
    count: Option<usize>,

    /// Update boids across threads (results are identical).
    #[arg(long)]
    parallel: bool,

    /// Log flock statistics every N ticks (0 disables periodic reports).
    #[arg(long, default_value_t = 100)]
    report_every: u64,
}

fn main() -> Result<()> {
    init_logging("flocking=info");
    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => load_params(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FlockParams::default(),
    };
    if let Some(seed) = cli.seed {
        params.seed = Some(seed);
    }
    if let Some(count) = cli.count {
        params.spawn_count = count;
    }
    params.parallel |= cli.parallel;

    let mut world = FlockWorld::from_params(&params).context("invalid flock parameters")?;

    let started = Instant::now();
    for _ in 0..cli.ticks {
        world.tick();

        if cli.report_every > 0 && world.tick_count() % cli.report_every == 0 {
            log_stats(&FlockStats::sample(&world));
        }
    }

    let elapsed = started.elapsed();
    let stats = FlockStats::sample(&world);
    log_stats(&stats);
    info!(
        ticks = cli.ticks,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "simulation finished"
    );

    Ok(())
}

fn log_stats(stats: &FlockStats) {
    info!(
        tick = stats.tick,
        boids = stats.boid_count,
        mean_speed = stats.mean_speed,
        max_speed = stats.max_speed,
        polarization = stats.polarization,
        centroid = ?stats.centroid,
        out_of_bounds = stats.out_of_bounds,
        "flock stats"
    );
}
