//! `tg-output`: CSV output for tilegrid simulations.
//!
//! | File                  | One row per                                   |
//! |-----------------------|-----------------------------------------------|
//! | `agent_snapshots.csv` | live agent, every snapshot tick               |
//! | `claims.csv`          | claim-table entry, every snapshot tick        |
//! | `tick_summaries.csv`  | tick                                          |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`SnapshotObserver`], which implements `tg_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tg_output::{CsvWriter, SnapshotObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SnapshotObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SnapshotObserver;
pub use row::{AgentSnapshotRow, ClaimRow, TickSummaryRow};
pub use writer::OutputWriter;
