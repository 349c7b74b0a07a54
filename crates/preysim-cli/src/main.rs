//! Command line driver for the fox and rabbit simulation.

mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use preysim_core::SimulationConfig;
use preysim_world::{Simulation, SimulationResult};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "preysim", about = "Grid-based fox and rabbit population simulation")]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of field rows
    #[arg(long)]
    depth: Option<i32>,
    /// Number of field columns
    #[arg(long)]
    width: Option<i32>,
    /// Initial fox count
    #[arg(long)]
    foxes: Option<usize>,
    /// Initial rabbit count
    #[arg(long)]
    rabbits: Option<usize>,
    /// Steps to simulate
    #[arg(long)]
    steps: Option<u64>,
    /// Random seed; runs vary when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Steps between census log lines (0 disables them)
    #[arg(long)]
    report_interval: Option<u64>,
    /// Print the run result as JSON on stdout
    #[arg(long)]
    json: bool,
    /// Print the final field on stdout
    #[arg(long)]
    render: bool,
    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn load_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(depth) = self.depth {
            config.field.depth = depth;
        }
        if let Some(width) = self.width {
            config.field.width = width;
        }
        if let Some(foxes) = self.foxes {
            config.population.foxes = foxes;
        }
        if let Some(rabbits) = self.rabbits {
            config.population.rabbits = rabbits;
        }
        if let Some(steps) = self.steps {
            config.num_steps = steps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(interval) = self.report_interval {
            config.report_interval = interval;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    telemetry::init_telemetry(args.log_json)?;

    let config = args.load_config()?;
    info!(
        depth = config.field.depth,
        width = config.field.width,
        foxes = config.population.foxes,
        rabbits = config.population.rabbits,
        seed = ?config.seed,
        "Starting preysim"
    );

    let mut simulation = Simulation::new(config)?;
    let result = simulation.run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    if args.render {
        println!("{}", simulation.field().render());
    }

    Ok(())
}

fn print_summary(result: &SimulationResult) {
    println!(
        "step={} stop={:?} foxes={} rabbits={}",
        result.final_step, result.stop_reason, result.final_counts.foxes, result.final_counts.rabbits
    );
}
