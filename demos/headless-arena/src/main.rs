use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use quickout_engine::{ArenaConfig, CollisionStrategy, FixedTimestep, Level};

#[derive(Parser, Debug)]
#[command(about = "Simulate a quickout arena headlessly", version)]
struct Args {
    /// JSON arena configuration. Defaults are used for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Simulated wall-clock seconds.
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,
    /// Host frame rate; physics still ticks at the configured fixed dt.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Start without the opening five balls.
    #[arg(long)]
    empty: bool,
    /// Use the manual pairwise resolver for ball-ball contacts.
    #[arg(long)]
    pairwise: bool,
    #[arg(long)]
    seed: Option<u64>,
    /// Print the final ball snapshot as JSON.
    #[arg(long)]
    dump: bool,
}

fn load_config(args: &Args) -> Result<ArenaConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ArenaConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ArenaConfig::default(),
    };
    if args.pairwise {
        config.collision_strategy = CollisionStrategy::Pairwise;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(args.fps > 0.0, "--fps must be positive");

    let config = load_config(&args)?;
    let mut timestep = FixedTimestep::new(config.fixed_dt);
    let mut level = Level::new(config);
    if args.empty {
        level.init_empty();
    } else {
        level.init();
    }

    let frame_dt = 1.0 / args.fps;
    let frames = (args.seconds * args.fps).round() as u64;
    let report_every = args.fps.round().max(1.0) as u64;
    let mut peak = level.registry().len();

    for frame in 1..=frames {
        for _ in 0..timestep.accumulate(frame_dt) {
            level.update(timestep.dt());
            peak = peak.max(level.registry().len());
        }
        if frame % report_every == 0 {
            info!(
                "t={:>5.1}s balls={:>2}/{} spawned={} removed={} timer={:.3}",
                frame as f32 * frame_dt,
                level.registry().len(),
                level.max_entities(),
                level.spawned(),
                level.verdicts().total(),
                level.respawn_timer(),
            );
        }
    }

    println!(
        "{} physics frames: {} live, peak {}, {} spawned, {} removed",
        level.frame(),
        level.registry().len(),
        peak,
        level.spawned(),
        level.verdicts().total(),
    );
    if args.dump {
        println!("{}", serde_json::to_string_pretty(&level.snapshot())?);
    }
    Ok(())
}
