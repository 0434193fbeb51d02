//! Plain data row types written by output backends.

use xw_agent::Agent;
use xw_core::Tick;
use xw_sim::TickMetrics;

/// One row of the per-tick metrics table.
///
/// Signal phases are stored as their display strings (`"GREEN"`, `"WALK"`, …).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMetricsRow {
    pub tick:                 u64,
    pub cars_passed:          u64,
    pub avg_travel_time:      f64,
    pub avg_waiting_time:     f64,
    pub queue_length:         u32,
    pub pedestrians_crossed:  u64,
    pub avg_pedestrian_time:  f64,
    pub pedestrian_wait_time: f64,
    pub emergency_active:     bool,
    pub emergencies_cleared:  u64,
    pub vehicle_phase:        &'static str,
    pub pedestrian_phase:     &'static str,
}

impl From<&TickMetrics> for TickMetricsRow {
    fn from(m: &TickMetrics) -> Self {
        Self {
            tick:                 m.tick.0,
            cars_passed:          m.cars_passed,
            avg_travel_time:      m.avg_travel_time,
            avg_waiting_time:     m.avg_waiting_time,
            queue_length:         m.queue_length,
            pedestrians_crossed:  m.pedestrians_crossed,
            avg_pedestrian_time:  m.avg_pedestrian_time,
            pedestrian_wait_time: m.pedestrian_wait_time,
            emergency_active:     m.emergency_active,
            emergencies_cleared:  m.emergencies_cleared,
            vehicle_phase:        m.vehicle_phase.as_str(),
            pedestrian_phase:     m.pedestrian_phase.as_str(),
        }
    }
}

/// Position and display tier of one agent at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub tick:         u64,
    pub agent_id:     u32,
    pub kind:         &'static str,
    pub x:            u32,
    pub y:            u32,
    pub wait_counter: u32,
    /// Wait tier for vehicles, walk tier for pedestrians.
    pub tier:         &'static str,
}

impl AgentSnapshotRow {
    pub fn of(tick: Tick, agent: &Agent, wait_threshold: u32) -> Self {
        let tier = match agent.pedestrian_tier() {
            Some(t) => t.as_str(),
            None => agent.wait_tier(wait_threshold).as_str(),
        };
        Self {
            tick:         tick.0,
            agent_id:     agent.id.0,
            kind:         agent.kind().as_str(),
            x:            agent.cell.x,
            y:            agent.cell.y,
            wait_counter: agent.wait_counter,
            tier,
        }
    }
}
