//! Sun-Earth-Moon frame loop driver
//!
//! Runs the simulation clock for a number of frames and prints the resolved
//! state of every body: absolute position, spin angle and orbit trail extent.
//!
//! Usage:
//!   cargo run --bin stellara -- [--date "2024-10-03 02:30:00"] [--frames 10]

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::{debug, info};
use stellara::constants::AU_KM;
use stellara::time::clock::SimulationClock;
use stellara::time::format_date;
use stellara::{BodyState, SolarSystem, StellaraConfig};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sun-Earth-Moon position engine
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prints Sun, Earth and Moon positions while advancing simulated time",
    long_about = None
)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start timestamp, overriding the configured one
    #[arg(short = 'd', long)]
    date: Option<String>,

    /// Playback speed in simulated seconds per real second
    #[arg(short, long)]
    speed: Option<f64>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 10)]
    frames: usize,

    /// Real seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_seconds: f64,

    /// Print every trail point instead of its extent
    #[arg(long, action = ArgAction::SetTrue)]
    trails: bool,

    /// Display detailed debugging information
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn print_state(state: &BodyState, show_trail: bool) {
    let p = state.position;
    print!(
        "  {:<6} [{:>14.9}, {:>14.9}, {:>14.9}] AU",
        state.name, p.x, p.y, p.z
    );
    if let Some((_, angle)) = state.rotation {
        print!("  spin {:>8.3} deg", angle.to_degrees());
    }
    println!();

    if state.trail.is_empty() {
        return;
    }
    if show_trail {
        for point in &state.trail {
            println!("    {:.9} {:.9} {:.9}", point.x, point.y, point.z);
        }
    } else {
        let first = state.trail[0];
        let last = state.trail[state.trail.len() - 1];
        println!(
            "    trail: {} points, ends {:.0} km apart",
            state.trail.len(),
            (last - first).norm() * AU_KM
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match &args.config {
        Some(path) => StellaraConfig::from_file(path)?,
        None => StellaraConfig::default(),
    };
    if let Some(date) = args.date {
        config.clock.start = date;
    }
    if let Some(speed) = args.speed {
        config.clock.speed = speed;
    }
    config.validate()?;
    debug!("configuration: {:?}", config);

    let mut clock = SimulationClock::from_config(&config.clock)?;
    let mut system = SolarSystem::from_config(&config)?;
    info!(
        "starting at {} (JD {:.6}), speed {}x",
        format_date(clock.current())?,
        clock.current(),
        clock.speed()
    );

    for frame in 0..args.frames {
        let jd = clock.current();
        println!("frame {} JD {:.6} {}", frame, jd, format_date(jd)?);
        for state in system.resolve(jd)? {
            print_state(&state, args.trails);
        }
        clock.tick(args.frame_seconds);
    }

    for (_, body) in system.bodies() {
        if let Some(trail) = body.trail() {
            let stats = trail.stats();
            info!(
                "{} trail: {} evaluations, {} resamples",
                body.name(),
                stats.evaluations,
                stats.resamples
            );
        }
    }

    Ok(())
}
