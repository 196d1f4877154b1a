use bounce_arena::{utils, Arena, ArenaConfig};

use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;
use std::thread;
use std::time::Instant;

/// Headless host: runs the arena for a number of ticks and optionally saves the result.
#[derive(Parser, Debug)]
struct Args {
    /// JSON config file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Overrides the config seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Restore the population from a saved JSON file instead of spawning one.
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the final population here.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Give every body a random acceleration before starting.
    #[arg(short, long)]
    accelerate: bool,

    /// Sleep for the configured tick interval between ticks.
    #[arg(long)]
    realtime: bool,
}

fn load_config(args: &Args) -> Result<ArenaConfig> {
    let mut config = match &args.config {
        Some(path) => ArenaConfig::from_file(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => ArenaConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    let mut rng = utils::rng_from_seed(config.seed);
    let mut arena = Arena::from_config(&config);

    match &args.load {
        Some(path) => {
            arena
                .load_from_file(path)
                .with_context(|| format!("loading population '{}'", path.display()))?;
        }
        None => arena.populate(&mut rng, config.shape),
    }

    if args.accelerate {
        arena.toggle_acceleration_all(&mut rng);
    }

    log::info!(
        "running {} ticks with {}/{} bodies in {:?}",
        args.ticks,
        arena.len(),
        arena.capacity(),
        arena.bounds()
    );

    let interval = config.tick_interval();
    let start = Instant::now();
    for _ in 0..args.ticks {
        arena.update();
        if args.realtime {
            thread::sleep(interval);
        }
    }
    let elapsed = start.elapsed();

    let energy: f64 = arena
        .bodies()
        .map(|(_, b)| 0.5 * b.mass() * b.vel.mag_sq())
        .sum();
    log::info!(
        "finished tick {} in {:.2?}, kinetic energy {:.3}",
        arena.tick,
        elapsed,
        energy
    );

    if let Some(path) = &args.save {
        arena
            .save_to_file(path)
            .with_context(|| format!("saving population '{}'", path.display()))?;
    }

    Ok(())
}
