//! Run discovery: locating timestamped simulation run directories.
//!
//! The exporter writes each run under `data/runs/run_YYYYMMDD_HHMMSS/`.
//! Discovery lists a base directory, keeps the children whose names parse
//! under that exact pattern, and picks the most recent. An explicit
//! `SPACESIM_RUN_PATH` override always wins and skips discovery entirely.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::SimDataError;

/// Environment variable that overrides run discovery entirely.
pub const RUN_PATH_ENV_VAR: &str = "SPACESIM_RUN_PATH";

/// Default base directory scanned for runs, relative to the working directory.
pub const DEFAULT_RUNS_DIR: &str = "data/runs";

const RUN_DIR_PREFIX: &str = "run_";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TIMESTAMP_LEN: usize = 15; // YYYYMMDD_HHMMSS

/// A discovered run directory and the timestamp parsed from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    pub path: PathBuf,
    pub timestamp: NaiveDateTime,
}

impl RunInfo {
    /// The run directory's own name, e.g. `run_20251130_182530`.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
    }
}

/// Parse the creation timestamp out of a run directory name.
///
/// Accepts exactly `run_` followed by `YYYYMMDD_HHMMSS`; anything else
/// (wrong prefix, wrong length, non-numeric or out-of-range calendar
/// fields) yields `None` rather than an error.
pub fn parse_run_timestamp(name: &str) -> Option<NaiveDateTime> {
    let suffix = name.strip_prefix(RUN_DIR_PREFIX)?;
    if suffix.len() != TIMESTAMP_LEN {
        return None;
    }
    NaiveDateTime::parse_from_str(suffix, TIMESTAMP_FORMAT).ok()
}

/// Immediate children of `base` that are directories with parseable run
/// names. Everything else (files, unrelated directories) is skipped.
fn scan_runs(base: &Path) -> Result<Vec<RunInfo>, SimDataError> {
    if !base.exists() {
        return Err(SimDataError::RunsDirectoryNotFound {
            path: base.to_path_buf(),
        });
    }
    let entries = fs::read_dir(base).map_err(|_| SimDataError::RunsDirectoryNotFound {
        path: base.to_path_buf(),
    })?;

    let mut runs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(timestamp) = parse_run_timestamp(name) {
            runs.push(RunInfo { path, timestamp });
        }
    }
    Ok(runs)
}

/// All valid runs under `base`, most recent first.
///
/// Timestamp ties (only possible through filesystem oddities, since the
/// name determines the timestamp) order by directory name, descending.
pub fn list_runs(base: &Path) -> Result<Vec<RunInfo>, SimDataError> {
    let mut runs = scan_runs(base)?;
    if runs.is_empty() {
        return Err(SimDataError::NoValidRunsFound {
            path: base.to_path_buf(),
        });
    }
    runs.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.name().cmp(a.name()))
    });
    debug!(base = %base.display(), count = runs.len(), "discovered runs");
    Ok(runs)
}

/// Find the most recent run directory under `base`.
pub fn find_most_recent_run(base: &Path) -> Result<PathBuf, SimDataError> {
    let runs = scan_runs(base)?;
    runs.into_iter()
        .max_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.name().cmp(b.name()))
        })
        .map(|run| {
            debug!(run = run.name(), "selected most recent run");
            run.path
        })
        .ok_or_else(|| SimDataError::NoValidRunsFound {
            path: base.to_path_buf(),
        })
}

/// Resolve the run path to analyze.
///
/// Precedence: the `SPACESIM_RUN_PATH` environment variable if set to a
/// non-empty value (used verbatim, no existence check), else the most
/// recent run under `base` (default `data/runs`).
pub fn resolve_run_path(base: Option<&Path>) -> Result<PathBuf, SimDataError> {
    resolve_run_path_with(|var| std::env::var(var).ok(), RUN_PATH_ENV_VAR, base)
}

/// Same as [`resolve_run_path`], with the environment read injected so
/// tests can exercise the precedence rule without touching the real
/// process environment.
pub fn resolve_run_path_with<F>(
    env_lookup: F,
    env_var: &str,
    base: Option<&Path>,
) -> Result<PathBuf, SimDataError>
where
    F: FnOnce(&str) -> Option<String>,
{
    if let Some(path) = env_lookup(env_var).filter(|value| !value.is_empty()) {
        debug!(env_var, path = %path, "using run path from environment override");
        return Ok(PathBuf::from(path));
    }
    find_most_recent_run(base.unwrap_or(Path::new(DEFAULT_RUNS_DIR)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parses_valid_run_name() {
        assert_eq!(
            parse_run_timestamp("run_20251130_182530"),
            Some(ts(2025, 11, 30, 18, 25, 30))
        );
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert_eq!(parse_run_timestamp("not_a_run_20251130_182530"), None);
    }

    #[test]
    fn rejects_unparsable_suffix() {
        assert_eq!(parse_run_timestamp("run_invalid_timestamp"), None);
    }

    #[test]
    fn rejects_truncated_suffix() {
        assert_eq!(parse_run_timestamp("run_20251130"), None);
        assert_eq!(parse_run_timestamp("run_20251130_1825"), None);
    }

    #[test]
    fn rejects_out_of_range_calendar_fields() {
        // month 13, hour 25
        assert_eq!(parse_run_timestamp("run_20251330_182530"), None);
        assert_eq!(parse_run_timestamp("run_20251130_252530"), None);
    }

    #[test]
    fn rejects_extra_characters() {
        assert_eq!(parse_run_timestamp("run_20251130_182530_extra"), None);
        assert_eq!(parse_run_timestamp("run_20251130_1825300"), None);
    }
}
