//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `claims.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, ClaimRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 9] =
    ["tick", "agent_id", "x", "y", "tile_x", "tile_y", "state", "reserved_x", "reserved_y"];
pub const CLAIM_HEADER: [&str; 5] = ["tick", "tile_x", "tile_y", "kind", "agent_id"];
pub const SUMMARY_HEADER: [&str; 5] = ["tick", "elapsed_secs", "moving_agents", "arrivals", "path_failures"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    claims:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut claims = Writer::from_path(dir.join("claims.csv"))?;
        claims.write_record(CLAIM_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, claims, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let (rx, ry) = match row.reserved {
                Some(t) => (t.x.to_string(), t.y.to_string()),
                None    => (String::new(), String::new()),
            };
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                format!("{:.4}", row.x),
                format!("{:.4}", row.y),
                row.tile.x.to_string(),
                row.tile.y.to_string(),
                row.state.as_str().to_owned(),
                rx,
                ry,
            ])?;
        }
        Ok(())
    }

    fn write_claims(&mut self, rows: &[ClaimRow]) -> OutputResult<()> {
        for row in rows {
            self.claims.write_record(&[
                row.tick.to_string(),
                row.tile.x.to_string(),
                row.tile.y.to_string(),
                row.kind.as_str().to_owned(),
                row.agent_id.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.4}", row.elapsed_secs),
            row.moving_agents.to_string(),
            row.arrivals.to_string(),
            row.path_failures.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.claims.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
