//! ER Simulator CLI
//!
//! Thin runner around the simulation core: parses parameters, builds the
//! arrival generator and the engine, runs for a fixed number of ticks, and
//! prints per-tick progress plus the final statistics report to stdout.
//!
//! # Examples
//!
//! ```text
//! # Reference hospital, 1000 ticks, default seed
//! er-sim
//!
//! # Busier hospital with arrival-order queues and a fixed seed
//! er-sim --ticks 5000 --seed 7 --fifo --arrival-interval 3
//!
//! # Custom hospital layout from a JSON config file
//! er-sim --config hospital.json --snapshot
//! ```

use clap::Parser;
use er_simulator_core_rs::{
    GeneratorConfig, PatientGenerator, Simulation, SimulationConfig, SimulationError, StdoutSink,
};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Discrete-time hospital patient-flow simulator
#[derive(Parser)]
#[command(name = "er-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: usize,

    /// RNG seed; fully determines the arrival stream
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Use strict arrival-order waiting rooms instead of priority order
    #[arg(long)]
    fifo: bool,

    /// Average ticks between patient arrivals
    #[arg(long, default_value_t = 8)]
    arrival_interval: u32,

    /// Probability of a priority-1 arrival, in percent
    #[arg(long, default_value_t = 10)]
    prob_pri1: u32,

    /// Probability of a priority-2 arrival, in percent (remainder is priority 3)
    #[arg(long, default_value_t = 30)]
    prob_pri2: u32,

    /// Hospital layout and thresholds as a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final simulation state as JSON after the report
    #[arg(long)]
    snapshot: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Load the simulation configuration, from file when given, and apply the
/// queue-discipline override.
fn load_config(cli: &Cli) -> Result<SimulationConfig, CliError> {
    let mut config: SimulationConfig = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => SimulationConfig::default(),
    };
    if cli.fifo {
        config.use_priority_queues = false;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;

    let generator = PatientGenerator::new(
        GeneratorConfig {
            seed: cli.seed,
            arrival_interval: cli.arrival_interval,
            prob_pri1: cli.prob_pri1,
            prob_pri2: cli.prob_pri2,
            ..GeneratorConfig::default()
        },
        config.follow_up_department_names(),
    );

    let mut sim = Simulation::new(config, Box::new(generator), Box::new(StdoutSink))?;
    sim.run(Some(cli.ticks))?;

    if cli.snapshot {
        println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
