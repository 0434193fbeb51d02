//! Signal phase enums.

use std::fmt;

/// Vehicle light.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehiclePhase {
    Green,
    Red,
}

impl VehiclePhase {
    #[inline]
    pub fn opposite(self) -> VehiclePhase {
        match self {
            VehiclePhase::Green => VehiclePhase::Red,
            VehiclePhase::Red   => VehiclePhase::Green,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehiclePhase::Green => "GREEN",
            VehiclePhase::Red   => "RED",
        }
    }
}

impl fmt::Display for VehiclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pedestrian signal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PedestrianPhase {
    Walk,
    DontWalk,
}

impl PedestrianPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            PedestrianPhase::Walk     => "WALK",
            PedestrianPhase::DontWalk => "DONT_WALK",
        }
    }
}

impl fmt::Display for PedestrianPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which controller rule currently owns the signal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlMode {
    /// Plain GREEN/RED, actuated or timed per the configured policy.
    Cycling,
    /// A pedestrian-triggered WALK phase is running.
    PedestrianWalk,
    /// An emergency vehicle holds the intersection.
    EmergencyOverride,
}
