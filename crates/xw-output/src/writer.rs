//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, OutputResult, TickMetricsRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors never reach the tick loop: [`SimOutputObserver`][crate::SimOutputObserver]
/// keeps the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one row of per-tick metrics.
    fn write_metrics(&mut self, row: &TickMetricsRow) -> OutputResult<()>;

    /// Write a batch of agent snapshots, all from the same tick.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
