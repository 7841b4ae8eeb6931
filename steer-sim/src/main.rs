use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use steer_sim::{load_scenario, run};

#[derive(Parser, Debug)]
#[command(author, version, about = "Single-agent steering simulation", long_about = None)]
struct Args {
    /// Path to a scenario JSON file
    scenario: PathBuf,

    /// Override the scenario's tick count
    #[arg(short, long)]
    ticks: Option<u32>,

    /// Seed for the wander random walk (omit to draw from entropy)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Steering sim starting...");
    log::info!("Scenario: {}", args.scenario.display());

    let mut scenario = load_scenario(&args.scenario)?;
    if let Some(ticks) = args.ticks {
        scenario.ticks = ticks;
    }
    log::info!("Running {} ticks", scenario.ticks);

    let report = run(&scenario, args.seed).context("Simulation failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
