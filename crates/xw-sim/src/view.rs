//! Read-only agent views for visualizers and tests.

use xw_agent::{Agent, PedestrianState, PedestrianTier, WaitTier};
use xw_core::{AgentId, AgentKind, Cell};

/// What a visualizer needs to draw one agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AgentView {
    pub id:               AgentId,
    pub kind:             AgentKind,
    pub cell:             Cell,
    pub wait_counter:     u32,
    /// Congestion tier; meaningful for vehicles.
    pub wait_tier:        WaitTier,
    /// `None` for vehicles.
    pub pedestrian_state: Option<PedestrianState>,
    /// `None` for vehicles.
    pub pedestrian_tier:  Option<PedestrianTier>,
}

impl AgentView {
    pub fn of(agent: &Agent, wait_threshold: u32) -> Self {
        Self {
            id:               agent.id,
            kind:             agent.kind(),
            cell:             agent.cell,
            wait_counter:     agent.wait_counter,
            wait_tier:        agent.wait_tier(wait_threshold),
            pedestrian_state: agent.pedestrian().map(|p| p.state),
            pedestrian_tier:  agent.pedestrian_tier(),
        }
    }
}
