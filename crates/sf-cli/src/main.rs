//! ScratchForge command line: plays scratch-card rounds from a JSON game
//! definition.
//!
//! A single round writes its result record to a JSON file. With
//! `--rounds` above one the tool switches to batch simulation and prints
//! session statistics to stdout instead.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sf_engine::{BatchOptions, GameConfig, play_round, run_batch};

#[derive(Debug, Parser)]
#[command(
    name = "scratchforge",
    version,
    about = "Probability-driven scratch card game engine"
)]
struct Args {
    /// Path to the game definition JSON
    #[arg(long)]
    config: PathBuf,

    /// Amount wagered per round
    #[arg(long = "betting-amount", value_parser = clap::value_parser!(u64).range(1..))]
    betting_amount: u64,

    /// Where the round result is written
    #[arg(long, default_value = "result.json")]
    output: PathBuf,

    /// Number of rounds; more than one switches to batch simulation
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    rounds: u64,

    /// Base seed for reproducible batch runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = GameConfig::load(&args.config)
        .with_context(|| format!("failed to load game definition {}", args.config.display()))?;
    log::info!(
        "loaded {}x{} game with {} symbols and {} win combinations",
        config.rows(),
        config.columns(),
        config.symbols().len(),
        config.patterns().len()
    );

    if args.rounds > 1 {
        run_simulation(&config, &args)
    } else {
        run_single_round(&config, &args)
    }
}

fn run_single_round(config: &GameConfig, args: &Args) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    let result = play_round(config, args.betting_amount, &mut rng)?;

    let json = serde_json::to_string_pretty(&result)?;
    fs::write(&args.output, json)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!(
        "round complete: reward {} written to {}",
        result.reward,
        args.output.display()
    );
    Ok(())
}

fn run_simulation(config: &GameConfig, args: &Args) -> anyhow::Result<()> {
    let options = BatchOptions {
        rounds: args.rounds,
        bet: args.betting_amount,
        seed: args.seed,
    };
    let stats = run_batch(config, &options)?;

    let summary = serde_json::json!({
        "rounds": stats.rounds,
        "wins": stats.wins,
        "total_bet": stats.total_bet,
        "total_reward": stats.total_reward,
        "max_reward": stats.max_reward,
        "rtp_percent": stats.rtp(),
        "hit_rate_percent": stats.hit_rate(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
