//! Read-only simulation state passed to every behavior callback.

use xw_agent::{AgentStore, PedestrianState};
use xw_core::{Cell, SimConfig, Tick};
use xw_grid::Grid;
use xw_signal::Signal;

/// Fixed intersection geometry, derived once from [`SimConfig`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Geometry {
    pub width:           u32,
    pub height:          u32,
    pub crossing_column: u32,
    pub vehicle_lane:    u32,
}

impl From<&SimConfig> for Geometry {
    fn from(cfg: &SimConfig) -> Self {
        Self {
            width:           cfg.width,
            height:          cfg.height,
            crossing_column: cfg.crossing_column(),
            vehicle_lane:    cfg.vehicle_lane(),
        }
    }
}

/// A read-only snapshot of the simulation passed to every
/// [`BehaviorModel`][crate::BehaviorModel] callback.
///
/// Built once per tick by xw-sim after the spawn and signal phases, and
/// shared immutably across all agents during the decide phase.  xw-sim never
/// allows mutable access to these structures while a `SimContext` is live.
pub struct SimContext<'a> {
    /// Tick being processed.
    pub tick: Tick,

    pub geometry: Geometry,

    /// The signal as updated by the controller for this tick.
    pub signal: &'a Signal,

    /// Occupancy at the start of the decide phase.
    pub grid: &'a Grid,

    /// Every live agent, as of the start of the decide phase.
    pub agents: &'a AgentStore,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(
        tick:     Tick,
        geometry: Geometry,
        signal:   &'a Signal,
        grid:     &'a Grid,
        agents:   &'a AgentStore,
    ) -> Self {
        Self { tick, geometry, signal, grid, agents }
    }

    /// `true` if a pedestrian mid-crossing stands on the crosswalk next to or
    /// on the vehicle lane.
    pub fn crossing_blocked(&self) -> bool {
        let Geometry { crossing_column, vehicle_lane, .. } = self.geometry;
        let lo = vehicle_lane.saturating_sub(1);
        let hi = vehicle_lane + 1;
        (lo..=hi).any(|y| {
            self.grid
                .pedestrians_at(Cell::new(crossing_column, y))
                .iter()
                .filter_map(|&id| self.agents.get(id))
                .any(|a| a.pedestrian().is_some_and(|p| p.state == PedestrianState::Crossing))
        })
    }
}
