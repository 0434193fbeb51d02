//! Fluent builder for constructing a [`Sim`].

use xw_agent::AgentStore;
use xw_behavior::{BehaviorModel, Geometry};
use xw_core::{SimClock, SimConfig, SimRng};
use xw_grid::Grid;
use xw_signal::{Controller, SignalTiming, VehiclePhase};

use crate::{MetricsSeries, Sim, SimResult};

/// Fluent builder for [`Sim<B>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: grid size, spawn rates, signal timing, seed
/// - `B: BehaviorModel`: the decision rules (normally
///   [`IntersectionRules`][xw_behavior::IntersectionRules])
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default            |
/// |--------------------------|--------------------|
/// | `.initial_phase(p)`      | `VehiclePhase::Green` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default(), IntersectionRules).build()?;
/// sim.run_ticks(500, &mut NoopObserver);
/// println!("{} cars passed", sim.cars_passed());
/// ```
pub struct SimBuilder<B: BehaviorModel> {
    config:        SimConfig,
    behavior:      B,
    initial_phase: VehiclePhase,
}

impl<B: BehaviorModel> SimBuilder<B> {
    pub fn new(config: SimConfig, behavior: B) -> Self {
        Self { config, behavior, initial_phase: VehiclePhase::Green }
    }

    /// Start the timed cycle in `phase` instead of GREEN.
    pub fn initial_phase(mut self, phase: VehiclePhase) -> Self {
        self.initial_phase = phase;
        self
    }

    /// Validate the configuration and return a ready-to-run [`Sim`] at tick 0
    /// with an empty grid.
    pub fn build(self) -> SimResult<Sim<B>> {
        self.config.validate()?;

        let timing = SignalTiming::from(&self.config);
        Ok(Sim {
            geometry:   Geometry::from(&self.config),
            grid:       Grid::new(self.config.width, self.config.height),
            agents:     AgentStore::new(),
            controller: Controller::with_initial_phase(timing, self.initial_phase),
            rng:        SimRng::new(self.config.seed),
            clock:      SimClock::new(),
            metrics:    MetricsSeries::new(),
            totals:     Default::default(),
            behavior:   self.behavior,
            config:     self.config,
        })
    }
}
