//! `SnapshotObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use tg_claims::ClaimTable;
use tg_core::{AgentId, SimConfig, Tick, TileCoord};
use tg_path::PathError;
use tg_sim::{AgentArena, SimObserver};

use crate::row::{AgentSnapshotRow, ClaimRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes a summary row every tick and agent/claim
/// rows at each snapshot.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SnapshotObserver<W: OutputWriter> {
    writer:        W,
    step_secs:     f64,
    arrivals:      u64,
    path_failures: u64,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SnapshotObserver<W> {
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            step_secs:     config.step_secs,
            arrivals:      0,
            path_failures: 0,
            last_error:    None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer outside of `on_sim_end`, e.g. after `run_ticks`.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SnapshotObserver<W> {
    fn on_arrival(&mut self, _tick: Tick, _agent: AgentId, _tile: TileCoord) {
        self.arrivals += 1;
    }

    fn on_path_failed(&mut self, _tick: Tick, _agent: AgentId, _error: &PathError) {
        self.path_failures += 1;
    }

    fn on_tick_end(&mut self, tick: Tick, moving: usize) {
        let row = TickSummaryRow {
            tick:          tick.0,
            elapsed_secs:  tick.0 as f64 * self.step_secs,
            moving_agents: moving as u64,
            arrivals:      std::mem::take(&mut self.arrivals),
            path_failures: std::mem::take(&mut self.path_failures),
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentArena, claims: &ClaimTable) {
        let snaps: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|(id, c)| AgentSnapshotRow::capture(tick.0, id, c))
            .collect();
        if !snaps.is_empty() {
            let result = self.writer.write_snapshots(&snaps);
            self.store_err(result);
        }

        let rows: Vec<ClaimRow> = claims.iter().map(|c| ClaimRow::from_claim(tick.0, &c)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_claims(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
