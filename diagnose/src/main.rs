//! Thin diagnostic CLI over the sim-data loader.
//!
//! Locates a run the same way the analysis notebooks do (environment
//! override, explicit path, or most-recent discovery) and prints what the
//! export contains. Deeper analysis belongs in the notebooks; this tool
//! only answers "which run, and is its data there?".

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sim_data::{DEFAULT_RUNS_DIR, Dataset, RUN_PATH_ENV_VAR, SimDataError, SimulationData};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "diagnose", about = "Inspect exported spacesim2 run data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List discovered runs, most recent first
    Runs {
        /// Base directory scanned for run directories
        #[arg(long, default_value = DEFAULT_RUNS_DIR)]
        runs_dir: PathBuf,
    },
    /// Print shape and head of each dataset in a run
    Summary {
        /// Base directory scanned when no explicit run is given
        #[arg(long, default_value = DEFAULT_RUNS_DIR)]
        runs_dir: PathBuf,
        /// Explicit run directory (SPACESIM_RUN_PATH still overrides this)
        #[arg(long)]
        run: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SimDataError> {
    match cli.command {
        Command::Runs { runs_dir } => {
            for run in sim_data::list_runs(&runs_dir)? {
                println!(
                    "{}  {}",
                    run.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    run.path.display()
                );
            }
            Ok(())
        }
        Command::Summary { runs_dir, run } => {
            let run_path = select_run(run, &runs_dir)?;
            summarize(run_path);
            Ok(())
        }
    }
}

/// Precedence: environment override, then `--run`, then discovery.
fn select_run(explicit: Option<PathBuf>, runs_dir: &Path) -> Result<PathBuf, SimDataError> {
    let env_override = std::env::var(RUN_PATH_ENV_VAR)
        .ok()
        .filter(|value| !value.is_empty());
    match (env_override, explicit) {
        (Some(path), _) => Ok(PathBuf::from(path)),
        (None, Some(path)) => Ok(path),
        (None, None) => sim_data::find_most_recent_run(runs_dir),
    }
}

fn summarize(run_path: PathBuf) {
    let mut data = SimulationData::new(run_path);
    println!("run: {} ({})", data.simulation_id(), data.run_path().display());

    // A partially populated run is still worth summarizing; missing
    // datasets degrade to a warning instead of aborting.
    for dataset in Dataset::ALL {
        match data.dataset(dataset) {
            Ok(df) => {
                let (rows, cols) = df.shape();
                println!("\n{dataset}: {rows} rows x {cols} cols");
                println!("{}", df.head(Some(5)));
            }
            Err(err) => warn!(%dataset, "dataset unavailable: {err}"),
        }
    }
}
