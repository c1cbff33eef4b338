use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod display;
mod experiment;

use config::ExperimentConfig;
use display::Timeline;

/// Ambulance dispatch simulator
///
/// Feeds a seeded stream of prioritized call-outs to a fixed fleet and
/// reports the average completion time per priority.
///
/// Example usage:
///   ambulance-sim run --capacity 4 --seed 7
///   ambulance-sim run --config experiment.json --timeline
///   ambulance-sim sweep --min 4 --max 20 --json
#[derive(Parser)]
#[command(name = "ambulance-sim")]
#[command(version, about = "Priority scheduling simulator for a fixed ambulance fleet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "warn", global = true)]
    log_level: String,
}

/// Options shared by every command
#[derive(clap::Args)]
struct WorkloadArgs {
    /// Path to a JSON experiment configuration
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Override the workload seed
    #[arg(short, long, env = "AMBULANCE_SIM_SEED")]
    seed: Option<u64>,

    /// Override the number of ticks during which jobs arrive
    #[arg(short, long)]
    ticks: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl WorkloadArgs {
    fn load(&self) -> anyhow::Result<ExperimentConfig> {
        let mut config = ExperimentConfig::load(self.config.as_deref())?;
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(ticks) = self.ticks {
            config.arrival_ticks = ticks;
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run one experiment and report per-priority averages
    Run {
        #[command(flatten)]
        workload: WorkloadArgs,

        /// Override the fleet size
        #[arg(long)]
        capacity: Option<i64>,

        /// Print a line per tick showing busy and idle ambulances
        #[arg(long)]
        timeline: bool,
    },

    /// Run the same workload for a range of fleet sizes and pick the best
    Sweep {
        #[command(flatten)]
        workload: WorkloadArgs,

        /// Smallest fleet size
        #[arg(long, default_value_t = 4)]
        min: i64,

        /// Largest fleet size
        #[arg(long, default_value_t = 20)]
        max: i64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run {
            workload,
            capacity,
            timeline,
        } => {
            let mut config = workload.load()?;
            if let Some(capacity) = capacity {
                config.capacity = capacity;
            }
            config.show_timeline |= timeline;
            config.validate()?;

            let mut timeline = config.show_timeline.then(Timeline::new);
            let report = experiment::run_experiment(&config, config.capacity, timeline.as_mut())?;

            if let Some(timeline) = &timeline {
                print!("{}", timeline.render());
            }
            if workload.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render());
            }
        }

        Commands::Sweep { workload, min, max } => {
            let config = workload.load()?;
            config.validate()?;

            let result = experiment::sweep(&config, min, max)?;

            if workload.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for report in &result.reports {
                    println!("{}", report.render());
                    println!("  score: {:.3}", report.score());
                }
                println!(
                    "best capacity: {} (score {:.3})",
                    result.best_capacity, result.best_score
                );
            }
        }
    }

    Ok(())
}
