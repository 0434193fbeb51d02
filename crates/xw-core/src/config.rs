//! Simulation configuration.
//!
//! Typically built in code or loaded from a JSON/TOML file by the application
//! crate (enable the `serde` feature), then handed to `SimBuilder`, which
//! refuses to build from an invalid config.

use crate::{Cell, ConfigError, ConfigResult};

/// How the signal behaves when neither pedestrians nor emergency vehicles ask
/// for anything.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalPolicy {
    /// Vehicles hold GREEN until a waiting pedestrian or a priority request
    /// takes it away.  A RED start still runs out its `red_duration`.
    #[default]
    Actuated,
    /// Fixed GREEN/RED alternation from `green_duration` / `red_duration`.
    Timed,
}

/// Construction parameters for one intersection run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Grid width in cells.  The crossing column is `width / 2`.
    pub width: u32,

    /// Grid height in cells.  The vehicle lane is `height / 2`; rows 0 and
    /// `height - 1` are the pedestrian sidewalks.
    pub height: u32,

    /// Per-tick probability that a vehicle spawns at the lane entry.
    pub spawn_rate: f64,

    /// Demand-actuated (default) or fixed-time control.
    pub signal_policy: SignalPolicy,

    /// Ticks of GREEN in the timed cycling mode.
    pub green_duration: u32,

    /// Ticks of RED in the timed cycling mode.
    pub red_duration: u32,

    /// Per-tick probability that a pedestrian spawns on a sidewalk edge.
    pub pedestrian_spawn_rate: f64,

    /// Base length of a pedestrian-triggered WALK phase, in ticks.
    pub walk_duration: u32,

    /// Per-tick probability that an emergency vehicle spawns (only while no
    /// override is active).
    pub emergency_spawn_rate: f64,

    /// Upper bound on extra WALK ticks granted to one walk phase while
    /// pedestrians are still waiting or mid-crossing.  Zero disables
    /// extension.
    pub walk_extension_cap: u32,

    /// Wait counter at which a vehicle's tier changes from short to long wait.
    pub wait_threshold: u32,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width:                 30,
            height:                3,
            spawn_rate:            0.15,
            signal_policy:         SignalPolicy::Actuated,
            green_duration:        10,
            red_duration:          10,
            pedestrian_spawn_rate: 0.05,
            walk_duration:         5,
            emergency_spawn_rate:  0.01,
            walk_extension_cap:    5,
            wait_threshold:        5,
            seed:                  42,
        }
    }
}

impl SimConfig {
    /// Check every parameter range.  Returns the first violation found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::GridTooSmall { width: self.width, height: self.height });
        }

        for (name, value) in [
            ("spawn_rate", self.spawn_rate),
            ("pedestrian_spawn_rate", self.pedestrian_spawn_rate),
            ("emergency_spawn_rate", self.emergency_spawn_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }

        for (name, value) in [
            ("green_duration", self.green_duration),
            ("red_duration", self.red_duration),
            ("walk_duration", self.walk_duration),
            ("wait_threshold", self.wait_threshold),
        ] {
            if value == 0 {
                return Err(ConfigError::NotPositive { name });
            }
        }

        Ok(())
    }

    // ── Derived geometry ──────────────────────────────────────────────────

    /// Column where the crosswalk intersects the vehicle lane.
    #[inline]
    pub fn crossing_column(&self) -> u32 {
        self.width / 2
    }

    /// Row of the single vehicle lane.
    #[inline]
    pub fn vehicle_lane(&self) -> u32 {
        self.height / 2
    }

    /// Entry cell of the vehicle lane.
    #[inline]
    pub fn lane_entry(&self) -> Cell {
        Cell::new(0, self.vehicle_lane())
    }

    /// The two sidewalk rows pedestrians spawn on.
    #[inline]
    pub fn sidewalk_rows(&self) -> [u32; 2] {
        [0, self.height - 1]
    }

    /// The sidewalk row opposite `row`.
    #[inline]
    pub fn opposite_row(&self, row: u32) -> u32 {
        if row == 0 { self.height - 1 } else { 0 }
    }
}
