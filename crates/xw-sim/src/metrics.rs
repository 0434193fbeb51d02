//! Per-tick aggregate metrics and the time series that collects them.

use xw_core::Tick;
use xw_signal::{PedestrianPhase, VehiclePhase};

// ── TickMetrics ───────────────────────────────────────────────────────────────

/// Aggregate state of the intersection at the end of one tick.
///
/// Counters are cumulative since tick 0; averages and counts describe the
/// agents live at the end of the tick.  Emergency vehicles are excluded from
/// every vehicle metric.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TickMetrics {
    pub tick: Tick,

    // ── Vehicles ──────────────────────────────────────────────────────────
    pub cars_passed:      u64,
    /// Mean ticks from spawn to exit over all exited vehicles.
    pub avg_travel_time:  f64,
    /// Mean wait counter over live vehicles.
    pub avg_waiting_time: f64,
    /// Live vehicles before the crossing column that were held last tick.
    pub queue_length:     u32,

    // ── Pedestrians ───────────────────────────────────────────────────────
    pub pedestrians_crossed:  u64,
    /// Mean ticks from spawn to exit over all exited pedestrians.
    pub avg_pedestrian_time:  f64,
    /// Mean wait counter over live pedestrians.
    pub pedestrian_wait_time: f64,
    /// Pedestrians standing at the crossing column.
    pub pedestrians_waiting:  u32,

    // ── Emergencies ───────────────────────────────────────────────────────
    pub emergency_active:    bool,
    pub emergencies_cleared: u64,

    // ── Signal / population ───────────────────────────────────────────────
    pub vehicle_phase:    VehiclePhase,
    pub pedestrian_phase: PedestrianPhase,
    pub live_vehicles:    u32,
    pub live_emergency:   u32,
    pub live_pedestrians: u32,
}

impl TickMetrics {
    /// Composite performance score relative to `baseline`.
    ///
    /// Each weighted metric is divided by `max(baseline value, 1)` before
    /// weighting.  Higher is better.
    pub fn score_against(&self, baseline: &TickMetrics, weights: &ScoreWeights) -> f64 {
        let norm = |value: f64, base: f64| value / base.max(1.0);
        weights.cars_passed
            * norm(self.cars_passed as f64, baseline.cars_passed as f64)
            + weights.avg_waiting_time
                * norm(self.avg_waiting_time, baseline.avg_waiting_time)
            + weights.pedestrians_crossed
                * norm(self.pedestrians_crossed as f64, baseline.pedestrians_crossed as f64)
            + weights.pedestrian_wait_time
                * norm(self.pedestrian_wait_time, baseline.pedestrian_wait_time)
            + weights.avg_travel_time
                * norm(self.avg_travel_time, baseline.avg_travel_time)
    }
}

/// Weights for [`TickMetrics::score_against`].  Negative weights penalise.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ScoreWeights {
    pub cars_passed:          f64,
    pub avg_waiting_time:     f64,
    pub pedestrians_crossed:  f64,
    pub pedestrian_wait_time: f64,
    pub avg_travel_time:      f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            cars_passed:          0.3,
            avg_waiting_time:     -0.2,
            pedestrians_crossed:  0.25,
            pedestrian_wait_time: -0.15,
            avg_travel_time:      -0.1,
        }
    }
}

// ── MetricsSeries ─────────────────────────────────────────────────────────────

/// Append-only time series of [`TickMetrics`], one entry per processed tick.
#[derive(Clone, Debug, Default)]
pub struct MetricsSeries {
    rows: Vec<TickMetrics>,
}

impl MetricsSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, row: TickMetrics) {
        debug_assert!(self.rows.last().is_none_or(|last| last.tick < row.tick));
        self.rows.push(row);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Metrics of the most recently processed tick.
    #[inline]
    pub fn last(&self) -> Option<&TickMetrics> {
        self.rows.last()
    }

    /// Metrics recorded for `tick`, if it has been processed.
    pub fn get(&self, tick: Tick) -> Option<&TickMetrics> {
        let first = self.rows.first()?.tick;
        let i = usize::try_from(tick.0.checked_sub(first.0)?).ok()?;
        self.rows.get(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickMetrics> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[TickMetrics] {
        &self.rows
    }
}
