//! mazegen: command-line maze level generator
//!
//! Generates a level and prints it as ASCII, JSON or a code matrix, or runs a
//! soak test that generates and validates many levels.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use strum::IntoEnumIterator;

use mz_core::{
    GeneratedLevel, GeneratorConfig, LevelGenerator, LevelPlan, MazeMode, MazeRng, clamp_dimension,
};

/// Procedural maze level generator
#[derive(Parser, Debug)]
#[command(name = "mazegen")]
#[command(author, version, about = "Generate solvable maze levels", long_about = None)]
struct Args {
    /// Layout mode (backtrack or rooms); defaults to the level's mode
    #[arg(short = 'm', long = "mode")]
    mode: Option<MazeMode>,

    /// Grid width in cells
    #[arg(short = 'W', long = "width")]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(short = 'H', long = "height")]
    height: Option<usize>,

    /// Level number; sets size, mode and collectible count
    #[arg(short = 'l', long = "level", default_value_t = 1)]
    level: u32,

    /// RNG seed for reproducible output
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Number of collectibles to request
    #[arg(short = 'c', long = "collectibles")]
    collectibles: Option<usize>,

    /// JSON config file (default: <config dir>/mazegen/config.json)
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

    /// Generate and validate this many levels instead of printing one
    #[arg(long = "trials")]
    trials: Option<usize>,

    /// Print the effective configuration as JSON and exit
    #[arg(long = "dump-config")]
    dump_config: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `#` wall, `.` floor, `S` start, `E` exit, `*` collectible
    Ascii,
    /// Whole level as JSON
    Json,
    /// Integer cell codes, one row per line
    Codes,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    if args.dump_config {
        println!("{}", config.to_config_string());
        return Ok(());
    }

    if let Some(trials) = args.trials {
        return run_trials(&args, &config, trials);
    }

    let mut generator = match args.seed {
        Some(seed) => LevelGenerator::with_seed(config, seed),
        None => LevelGenerator::from_entropy(config),
    };
    let plan = plan_from_args(&args, args.mode);
    let level = generator.generate_planned(&plan);
    log::info!(
        "seed {}: exit at ({}, {}), {} collectibles",
        generator.seed(),
        level.exit.x,
        level.exit.z,
        level.collectibles.len()
    );

    print_level(&level, args.format)
}

/// Explicit `--config`, else the per-user config file if present, else
/// defaults
fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    if let Some(path) = path {
        return GeneratorConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()));
    }

    let Some(default_path) = dirs::config_dir().map(|d| d.join("mazegen").join("config.json"))
    else {
        return Ok(GeneratorConfig::default());
    };
    if !default_path.exists() {
        return Ok(GeneratorConfig::default());
    }
    log::debug!("using config {}", default_path.display());
    GeneratorConfig::load_from_file(&default_path)
        .with_context(|| format!("loading config from {}", default_path.display()))
}

/// Level plan with command-line overrides applied
fn plan_from_args(args: &Args, mode: Option<MazeMode>) -> LevelPlan {
    let mut plan = LevelPlan::for_level(args.level);
    if let Some(mode) = mode {
        plan.mode = mode;
    }
    if let Some(width) = args.width {
        plan.width = clamp_dimension(width);
    }
    if let Some(height) = args.height {
        plan.height = clamp_dimension(height);
    }
    if let Some(count) = args.collectibles {
        plan.collectibles = count;
    }
    plan
}

fn print_level(level: &GeneratedLevel, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Ascii => print!("{}", level.grid.to_ascii()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(level).context("serializing level")?;
            println!("{}", json);
        }
        OutputFormat::Codes => {
            for row in level.grid.codes() {
                let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
                println!("{}", line.join(" "));
            }
        }
    }
    Ok(())
}

/// Soak test: generate `trials` levels per mode and validate each
fn run_trials(args: &Args, config: &GeneratorConfig, trials: usize) -> Result<()> {
    let base_seed = args.seed.unwrap_or_else(rand_seed);
    let modes: Vec<MazeMode> = match args.mode {
        Some(mode) => vec![mode],
        None => MazeMode::iter().collect(),
    };

    let mut failures = 0;
    let mut generated = 0;
    for mode in &modes {
        let plan = plan_from_args(args, Some(*mode));
        for i in 0..trials {
            let seed = base_seed.wrapping_add(i as u64);
            let mut generator = LevelGenerator::with_seed(config.clone(), seed);
            let level = generator.generate_planned(&plan);
            generated += 1;

            if let Err(e) = level.grid.validate(level.mode) {
                failures += 1;
                log::error!("{} seed {}: {}", mode, seed, e);
            }
            let spacing = config.collectibles.min_distance;
            let crowded = level.collectibles.iter().enumerate().any(|(i, a)| {
                level.collectibles[i + 1..]
                    .iter()
                    .any(|b| a.manhattan(*b) < spacing)
            });
            let quota = plan.collectibles.min(config.collectibles.max_count);
            if crowded || level.collectibles.len() > quota {
                failures += 1;
                log::error!("{} seed {}: collectible placement out of bounds", mode, seed);
            }
        }
    }

    println!(
        "{} levels generated ({}), {} failures",
        generated,
        modes
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        failures
    );
    if failures > 0 {
        bail!("{} of {} levels failed validation", failures, generated);
    }
    Ok(())
}

fn rand_seed() -> u64 {
    MazeRng::from_entropy().seed()
}
