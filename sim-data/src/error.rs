use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors surfaced by run discovery and dataset loading.
///
/// No retries, no local recovery: every failure is a hard stop the caller
/// decides how to handle (notebooks typically degrade their display, batch
/// tools abort).
#[derive(Debug, Error)]
pub enum SimDataError {
    /// The base directory scanned for runs does not exist.
    #[error(
        "runs directory not found: {}\nrun `spacesim2 analyze` to create simulation data",
        .path.display()
    )]
    RunsDirectoryNotFound { path: PathBuf },

    /// The base directory exists but holds no directory matching the run
    /// naming pattern.
    #[error(
        "no valid runs found in: {}\nrun `spacesim2 analyze` to create simulation data\nexpected directory pattern: run_YYYYMMDD_HHMMSS",
        .path.display()
    )]
    NoValidRunsFound { path: PathBuf },

    /// An expected dataset file is missing, unreadable, or not valid parquet.
    #[error("failed to read dataset `{dataset}` from {}: {source}", .path.display())]
    DatasetRead {
        dataset: &'static str,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}
