//! `SimOutputObserver<W>`, which bridges `SimObserver` to an `OutputWriter`.

use log::warn;

use xw_agent::AgentStore;
use xw_core::{SimConfig, Tick};
use xw_signal::Signal;
use xw_sim::{SimObserver, TickMetrics};

use crate::row::{AgentSnapshotRow, TickMetricsRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes per-tick metrics and agent snapshots to any
/// [`OutputWriter`] backend.
///
/// Metrics are written every tick; snapshots every `snapshot_interval` ticks
/// (default 1), starting at tick 0.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run_ticks()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    wait_threshold:    u32,
    snapshot_interval: u64,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the vehicle
    /// wait tiers.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            wait_threshold:    config.wait_threshold,
            snapshot_interval: 1,
            last_error:        None,
        }
    }

    /// Write agent snapshots only every `interval` ticks.  Zero disables them.
    pub fn with_snapshot_interval(mut self, interval: u64) -> Self {
        self.snapshot_interval = interval;
        self
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, metrics: &TickMetrics) {
        let result = self.writer.write_metrics(&TickMetricsRow::from(metrics));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, _signal: &Signal) {
        if self.snapshot_interval == 0 || tick.0 % self.snapshot_interval != 0 {
            return;
        }
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|a| AgentSnapshotRow::of(tick, a, self.wait_threshold))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
