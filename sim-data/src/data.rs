//! Lazy, memoized access to one run's exported parquet tables.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::debug;

use crate::error::SimDataError;

/// The four tables a run directory exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// One row per (actor, turn): identity, location, money, inventory.
    ActorTurns,
    /// One row per (actor, turn, drive): health, debt, buffer, urgency.
    ActorDrives,
    /// One row per completed trade.
    MarketTransactions,
    /// One row per (turn, planet, commodity): aggregate market state.
    MarketSnapshots,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::ActorTurns,
        Dataset::ActorDrives,
        Dataset::MarketTransactions,
        Dataset::MarketSnapshots,
    ];

    /// Dataset name, which is also the file stem of its parquet export.
    pub fn name(self) -> &'static str {
        match self {
            Dataset::ActorTurns => "actor_turns",
            Dataset::ActorDrives => "actor_drives",
            Dataset::MarketTransactions => "market_transactions",
            Dataset::MarketSnapshots => "market_snapshots",
        }
    }

    fn file_name(self) -> String {
        format!("{}.parquet", self.name())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lazy-loading accessor over one run's exported tables.
///
/// Construction performs no I/O, not even an existence check; each dataset
/// is read from storage on first access and cached for the lifetime of the
/// instance. Datasets are independent: a partially populated run directory
/// serves whatever files are present and fails only on the missing ones.
///
/// Accessors return the frame by value; polars frames clone by bumping
/// column refcounts, so repeated access stays cheap and the one-read-per-
/// dataset contract holds.
#[derive(Debug, Clone)]
pub struct SimulationData {
    run_path: PathBuf,
    simulation_id: String,
    actor_turns: Option<DataFrame>,
    actor_drives: Option<DataFrame>,
    market_transactions: Option<DataFrame>,
    market_snapshots: Option<DataFrame>,
}

impl SimulationData {
    /// Create an accessor over `run_path`. No validation happens here.
    pub fn new(run_path: impl Into<PathBuf>) -> Self {
        let run_path = run_path.into();
        let simulation_id = run_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            run_path,
            simulation_id,
            actor_turns: None,
            actor_drives: None,
            market_transactions: None,
            market_snapshots: None,
        }
    }

    pub fn run_path(&self) -> &Path {
        &self.run_path
    }

    /// The run directory's own name, e.g. `run_20251130_182530`.
    /// For display and logging only.
    pub fn simulation_id(&self) -> &str {
        &self.simulation_id
    }

    /// Actor state per turn (money, inventory, location).
    pub fn actor_turns(&mut self) -> Result<DataFrame, SimDataError> {
        self.dataset(Dataset::ActorTurns)
    }

    /// Drive metrics per (actor, turn, drive).
    pub fn actor_drives(&mut self) -> Result<DataFrame, SimDataError> {
        self.dataset(Dataset::ActorDrives)
    }

    /// Completed trades.
    pub fn market_transactions(&mut self) -> Result<DataFrame, SimDataError> {
        self.dataset(Dataset::MarketTransactions)
    }

    /// Aggregate market state per (turn, planet, commodity).
    pub fn market_snapshots(&mut self) -> Result<DataFrame, SimDataError> {
        self.dataset(Dataset::MarketSnapshots)
    }

    /// Load a dataset by kind, reading its parquet file on first access and
    /// returning the cached frame afterwards.
    pub fn dataset(&mut self, dataset: Dataset) -> Result<DataFrame, SimDataError> {
        let slot = match dataset {
            Dataset::ActorTurns => &mut self.actor_turns,
            Dataset::ActorDrives => &mut self.actor_drives,
            Dataset::MarketTransactions => &mut self.market_transactions,
            Dataset::MarketSnapshots => &mut self.market_snapshots,
        };
        if let Some(df) = slot.as_ref() {
            return Ok(df.clone());
        }

        let path = self.run_path.join(dataset.file_name());
        debug!(dataset = dataset.name(), path = %path.display(), "loading dataset");
        let df = read_table(&path, dataset)?;
        *slot = Some(df.clone());
        Ok(df)
    }
}

fn read_table(path: &Path, dataset: Dataset) -> Result<DataFrame, SimDataError> {
    let file = File::open(path).map_err(|error| SimDataError::DatasetRead {
        dataset: dataset.name(),
        path: path.to_path_buf(),
        source: PolarsError::IO {
            error: error.into(),
            msg: None,
        },
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|source| SimDataError::DatasetRead {
            dataset: dataset.name(),
            path: path.to_path_buf(),
            source,
        })
}
