//! Data-access layer for spacesim2 run exports.
//!
//! The simulation writes each run into a timestamped directory of parquet
//! tables. This crate covers the two pieces every analysis needs before it
//! can do anything interesting:
//!
//! - run discovery: resolve *which* run directory to read, either from the
//!   `SPACESIM_RUN_PATH` environment override or by picking the most recent
//!   `run_YYYYMMDD_HHMMSS` directory under a base path
//! - [`SimulationData`]: lazy, memoized access to the four exported tables
//!   of one run as polars `DataFrame`s
//!
//! The two pieces are independent; composition happens at the call site:
//!
//! ```ignore
//! let run = sim_data::resolve_run_path(None)?;
//! let mut data = sim_data::SimulationData::new(run);
//! let txns = data.market_transactions()?;
//! ```

mod data;
mod error;
mod runs;

pub use data::*;
pub use error::*;
pub use runs::*;
