//! Agent kind enum shared by the grid, the agent store, and output writers.

/// The closed set of agent kinds on the intersection grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    /// Regular car in the vehicle lane.
    Vehicle,
    /// Vehicle carrying the priority-request capability.
    EmergencyVehicle,
    /// Walker on the sidewalks and the crosswalk.
    Pedestrian,
}

impl AgentKind {
    /// `true` for both vehicle kinds.  Vehicles block each other; pedestrians
    /// only block vehicles.
    #[inline]
    pub fn is_vehicle(self) -> bool {
        !matches!(self, AgentKind::Pedestrian)
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Vehicle          => "vehicle",
            AgentKind::EmergencyVehicle => "emergency",
            AgentKind::Pedestrian       => "pedestrian",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
