//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, ClaimRow, OutputResult, TickSummaryRow};

/// A sink for simulation rows.
///
/// Errors never reach the sim: [`SnapshotObserver`][crate::SnapshotObserver]
/// keeps the first one for [`take_error`][crate::SnapshotObserver::take_error].
pub trait OutputWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_claims(&mut self, rows: &[ClaimRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
