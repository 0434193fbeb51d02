//! The agent record and its kind-specific bodies.

use xw_core::{AgentId, AgentKind, Cell, Heading, Tick};

// ── State enums ───────────────────────────────────────────────────────────────

/// Motion state of a vehicle, as of the last apply phase.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleState {
    Moving,
    Stopped,
    Exited,
}

/// Where a pedestrian is in its walk.
///
/// ```text
/// Approaching ──(reach crossing column)──▶ Waiting
/// Waiting ──(first vertical step)──▶ Crossing
/// Crossing ──(reach target row)──▶ Departing
/// Departing ──(step past the right edge)──▶ Exited
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PedestrianState {
    Approaching,
    Waiting,
    Crossing,
    Departing,
    Exited,
}

impl PedestrianState {
    pub fn as_str(self) -> &'static str {
        match self {
            PedestrianState::Approaching => "approaching",
            PedestrianState::Waiting     => "waiting",
            PedestrianState::Crossing    => "crossing",
            PedestrianState::Departing   => "departing",
            PedestrianState::Exited      => "exited",
        }
    }
}

// ── Visual tiers ──────────────────────────────────────────────────────────────

/// Congestion tier of a vehicle, used by visualizers to pick a colour.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaitTier {
    /// Moved last tick.
    Free,
    /// Held for fewer than `wait_threshold` ticks.
    Short,
    /// Held for `wait_threshold` ticks or more.
    Long,
}

impl WaitTier {
    pub fn from_wait(wait_counter: u32, threshold: u32) -> Self {
        match wait_counter {
            0                  => WaitTier::Free,
            n if n < threshold => WaitTier::Short,
            _                  => WaitTier::Long,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WaitTier::Free  => "free",
            WaitTier::Short => "short",
            WaitTier::Long  => "long",
        }
    }
}

/// Display tier of a pedestrian.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PedestrianTier {
    Walking,
    Waiting,
    Crossing,
}

impl PedestrianTier {
    pub fn as_str(self) -> &'static str {
        match self {
            PedestrianTier::Walking  => "walking",
            PedestrianTier::Waiting  => "waiting",
            PedestrianTier::Crossing => "crossing",
        }
    }
}

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Vehicle-specific state.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub state:        VehicleState,
    /// Carries the priority-request capability.
    pub is_emergency: bool,
    /// Set once an emergency vehicle's `x` has passed the crossing column.
    /// Always `false` for regular vehicles.
    pub cleared:      bool,
}

impl Vehicle {
    pub fn regular() -> Self {
        Self { state: VehicleState::Moving, is_emergency: false, cleared: false }
    }

    pub fn emergency() -> Self {
        Self { state: VehicleState::Moving, is_emergency: true, cleared: false }
    }
}

/// Pedestrian-specific state.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pedestrian {
    pub state:      PedestrianState,
    /// Sidewalk row on the far side of the crossing.
    pub target_row: u32,
    /// Horizontal direction toward the crossing column, fixed at spawn.
    pub heading:    Heading,
}

impl Pedestrian {
    /// A pedestrian spawned at `cell`, crossing to `target_row`.
    ///
    /// Starts `Waiting` if it is already standing in the crossing column.
    pub fn new(cell: Cell, target_row: u32, crossing_column: u32) -> Self {
        let heading = Heading::toward_x(cell.x, crossing_column).unwrap_or(Heading::East);
        let state = if cell.x == crossing_column {
            PedestrianState::Waiting
        } else {
            PedestrianState::Approaching
        };
        Self { state, target_row, heading }
    }

    /// Update the walk state after a successful move into `to`.
    fn advance(&mut self, from: Cell, to: Cell, crossing_column: u32) {
        if self.state == PedestrianState::Approaching && to.x == crossing_column {
            self.state = PedestrianState::Waiting;
        }
        if self.state == PedestrianState::Waiting && to.y != from.y {
            self.state = PedestrianState::Crossing;
        }
        if self.state == PedestrianState::Crossing && to.y == self.target_row {
            self.state = PedestrianState::Departing;
        }
    }
}

/// Kind-specific part of an [`Agent`].
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentBody {
    Vehicle(Vehicle),
    Pedestrian(Pedestrian),
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One live agent on the grid.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:           AgentId,
    pub cell:         Cell,
    pub spawn_tick:   Tick,
    /// Consecutive ticks held in place.  Reset to 0 by every move.
    pub wait_counter: u32,
    pub body:         AgentBody,
}

impl Agent {
    pub fn kind(&self) -> AgentKind {
        match &self.body {
            AgentBody::Vehicle(v) if v.is_emergency => AgentKind::EmergencyVehicle,
            AgentBody::Vehicle(_)                   => AgentKind::Vehicle,
            AgentBody::Pedestrian(_)                => AgentKind::Pedestrian,
        }
    }

    #[inline]
    pub fn vehicle(&self) -> Option<&Vehicle> {
        match &self.body {
            AgentBody::Vehicle(v) => Some(v),
            AgentBody::Pedestrian(_) => None,
        }
    }

    #[inline]
    pub fn pedestrian(&self) -> Option<&Pedestrian> {
        match &self.body {
            AgentBody::Pedestrian(p) => Some(p),
            AgentBody::Vehicle(_) => None,
        }
    }

    /// `true` for vehicles without the emergency capability.
    #[inline]
    pub fn is_regular_vehicle(&self) -> bool {
        self.vehicle().is_some_and(|v| !v.is_emergency)
    }

    #[inline]
    pub fn is_emergency(&self) -> bool {
        self.vehicle().is_some_and(|v| v.is_emergency)
    }

    /// `true` while this is an emergency vehicle that has not yet passed the
    /// crossing column.
    pub fn requests_priority(&self, crossing_column: u32) -> bool {
        self.vehicle()
            .is_some_and(|v| v.is_emergency && !v.cleared && self.cell.x <= crossing_column)
    }

    /// `true` for a pedestrian standing at the crossing column, not yet on
    /// the crosswalk.
    pub fn is_waiting_pedestrian(&self) -> bool {
        self.pedestrian().is_some_and(|p| p.state == PedestrianState::Waiting)
    }

    pub fn is_crossing_pedestrian(&self) -> bool {
        self.pedestrian().is_some_and(|p| p.state == PedestrianState::Crossing)
    }

    pub fn wait_tier(&self, threshold: u32) -> WaitTier {
        WaitTier::from_wait(self.wait_counter, threshold)
    }

    /// Display tier for pedestrians; `None` for vehicles.
    pub fn pedestrian_tier(&self) -> Option<PedestrianTier> {
        let p = self.pedestrian()?;
        Some(if p.state == PedestrianState::Crossing {
            PedestrianTier::Crossing
        } else if self.wait_counter > 0 {
            PedestrianTier::Waiting
        } else {
            PedestrianTier::Walking
        })
    }

    // ── Apply-phase mutation ──────────────────────────────────────────────

    /// Move to `to`: resets the wait counter and advances the walk state.
    pub fn record_move(&mut self, to: Cell, crossing_column: u32) {
        let from = self.cell;
        self.cell = to;
        self.wait_counter = 0;
        match &mut self.body {
            AgentBody::Vehicle(v) => v.state = VehicleState::Moving,
            AgentBody::Pedestrian(p) => p.advance(from, to, crossing_column),
        }
    }

    /// Stay put for one tick.
    pub fn record_hold(&mut self) {
        self.wait_counter += 1;
        if let AgentBody::Vehicle(v) = &mut self.body {
            v.state = VehicleState::Stopped;
        }
    }

    /// Mark the agent as having left the grid.
    pub fn record_exit(&mut self) {
        match &mut self.body {
            AgentBody::Vehicle(v) => v.state = VehicleState::Exited,
            AgentBody::Pedestrian(p) => p.state = PedestrianState::Exited,
        }
    }

    /// Mark an emergency vehicle as cleared if it has just passed the crossing
    /// column.  Returns `true` exactly once per emergency vehicle.
    pub fn mark_cleared(&mut self, crossing_column: u32) -> bool {
        let x = self.cell.x;
        match &mut self.body {
            AgentBody::Vehicle(v) if v.is_emergency && !v.cleared && x > crossing_column => {
                v.cleared = true;
                true
            }
            _ => false,
        }
    }
}
