//! Simulation observer trait for progress reporting and data collection.

use xw_agent::{Agent, AgentStore};
use xw_core::Tick;
use xw_signal::Signal;

use crate::TickMetrics;

/// Callbacks invoked by [`Sim::step_with`][crate::Sim::step_with] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: throughput printer
///
/// ```rust,ignore
/// struct Throughput { interval: u64 }
///
/// impl SimObserver for Throughput {
///     fn on_tick_end(&mut self, tick: Tick, metrics: &TickMetrics) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} cars passed", metrics.cars_passed);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per agent leaving the grid, during the apply phase.
    ///
    /// `agent` is the final state of the record, already marked exited.
    fn on_agent_exit(&mut self, _tick: Tick, _agent: &Agent) {}

    /// Called at the end of each tick with the metrics just appended to the
    /// series.
    fn on_tick_end(&mut self, _tick: Tick, _metrics: &TickMetrics) {}

    /// Called after `on_tick_end` with read-only access to every live agent
    /// and the signal, so output writers can record a snapshot without the
    /// sim knowing about any output format.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore, _signal: &Signal) {}

    /// Called once after the last tick of a [`run_ticks`][crate::Sim::run_ticks]
    /// batch.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
