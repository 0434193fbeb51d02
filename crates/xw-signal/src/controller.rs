//! The `Controller` state machine and the `Signal` it owns.

use log::debug;

use xw_core::{SignalPolicy, SimConfig};

use crate::{ControlMode, PedestrianPhase, VehiclePhase};

// ── Timing ────────────────────────────────────────────────────────────────────

/// Durations the controller reloads its timers from.  All in ticks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalTiming {
    pub policy:             SignalPolicy,
    pub green_duration:     u32,
    pub red_duration:       u32,
    pub walk_duration:      u32,
    pub walk_extension_cap: u32,
}

impl From<&SimConfig> for SignalTiming {
    fn from(cfg: &SimConfig) -> Self {
        Self {
            policy:             cfg.signal_policy,
            green_duration:     cfg.green_duration,
            red_duration:       cfg.red_duration,
            walk_duration:      cfg.walk_duration,
            walk_extension_cap: cfg.walk_extension_cap,
        }
    }
}

impl SignalTiming {
    #[inline]
    fn duration(&self, phase: VehiclePhase) -> u32 {
        match phase {
            VehiclePhase::Green => self.green_duration,
            VehiclePhase::Red   => self.red_duration,
        }
    }
}

// ── Signal ────────────────────────────────────────────────────────────────────

/// The combined vehicle/pedestrian signal.
///
/// Mutated only by [`Controller::update`]; everything else reads it through
/// `&Signal`.  Timers count the ticks that remain in the current phase
/// *after* the tick being processed, so a timer of 0 means "this is the last
/// tick of the phase".
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signal {
    vehicle_phase:      VehiclePhase,
    pedestrian_phase:   PedestrianPhase,
    mode:               ControlMode,
    phase_timer:        u32,
    walk_timer:         u32,
    walk_extensions:    u32,
    emergency_active:   bool,
    emergency_requests: u32,
}

impl Signal {
    /// Signal as it stands before tick 0: `phase` with a full timer, which the
    /// first update starts consuming.
    fn initial(phase: VehiclePhase, timing: &SignalTiming) -> Self {
        Self {
            vehicle_phase:      phase,
            pedestrian_phase:   PedestrianPhase::DontWalk,
            mode:               ControlMode::Cycling,
            phase_timer:        timing.duration(phase),
            walk_timer:         0,
            walk_extensions:    0,
            emergency_active:   false,
            emergency_requests: 0,
        }
    }

    #[inline]
    pub fn vehicle_phase(&self) -> VehiclePhase {
        self.vehicle_phase
    }

    #[inline]
    pub fn pedestrian_phase(&self) -> PedestrianPhase {
        self.pedestrian_phase
    }

    #[inline]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Ticks left in the current timed GREEN/RED phase.  Meaningful only in
    /// [`ControlMode::Cycling`]; idle during actuated GREEN.
    #[inline]
    pub fn phase_timer(&self) -> u32 {
        self.phase_timer
    }

    /// Ticks left in the current WALK phase before extensions.
    #[inline]
    pub fn walk_timer(&self) -> u32 {
        self.walk_timer
    }

    /// Extra WALK ticks already granted to the current walk phase.
    #[inline]
    pub fn walk_extensions(&self) -> u32 {
        self.walk_extensions
    }

    #[inline]
    pub fn emergency_active(&self) -> bool {
        self.emergency_active
    }

    /// Priority requests seen by the last update.
    #[inline]
    pub fn emergency_requests(&self) -> u32 {
        self.emergency_requests
    }

    #[inline]
    pub fn is_green(&self) -> bool {
        self.vehicle_phase == VehiclePhase::Green
    }

    #[inline]
    pub fn is_walk(&self) -> bool {
        self.pedestrian_phase == PedestrianPhase::Walk
    }
}

// ── Demand / events ───────────────────────────────────────────────────────────

/// What the controller sees of the intersection this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Demand {
    /// Emergency vehicles that have not yet passed the crossing column.
    pub priority_requests:    u32,
    /// Pedestrians standing at the crossing column waiting to cross.
    pub pedestrians_waiting:  u32,
    /// Pedestrians on the crosswalk.
    pub pedestrians_crossing: u32,
}

/// A transition reported by [`Controller::update`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SignalEvent {
    OverrideBegan,
    OverrideCleared,
    WalkStarted,
    WalkExtended,
    WalkEnded,
    PhaseFlipped(VehiclePhase),
}

// ── Controller ────────────────────────────────────────────────────────────────

/// Owns the [`Signal`] and advances it once per tick.
#[derive(Clone, Debug)]
pub struct Controller {
    timing: SignalTiming,
    signal: Signal,
}

impl Controller {
    /// A controller starting in GREEN.
    pub fn new(timing: SignalTiming) -> Self {
        Self::with_initial_phase(timing, VehiclePhase::Green)
    }

    /// A controller starting in timed `phase` with a full timer.
    pub fn with_initial_phase(timing: SignalTiming, phase: VehiclePhase) -> Self {
        Self { signal: Signal::initial(phase, &timing), timing }
    }

    #[inline]
    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    #[inline]
    pub fn timing(&self) -> &SignalTiming {
        &self.timing
    }

    /// Advance the state machine by one tick.
    ///
    /// Returns the transition that happened, if any.
    pub fn update(&mut self, demand: &Demand) -> Option<SignalEvent> {
        self.signal.emergency_requests = demand.priority_requests;

        let event = if demand.priority_requests > 0 {
            self.hold_override()
        } else if self.signal.emergency_active {
            self.signal.emergency_active = false;
            self.begin_green();
            Some(SignalEvent::OverrideCleared)
        } else if self.signal.mode == ControlMode::PedestrianWalk {
            self.tick_walk(demand)
        } else if self.signal.is_green() && demand.pedestrians_waiting > 0 {
            self.begin_walk();
            Some(SignalEvent::WalkStarted)
        } else {
            self.tick_cycle(demand)
        };

        debug_assert!(
            !self.signal.is_walk() || !self.signal.is_green(),
            "WALK shown while vehicles have GREEN",
        );
        if let Some(ev) = event {
            debug!(
                "signal {ev:?}: {} / {}",
                self.signal.vehicle_phase, self.signal.pedestrian_phase,
            );
        }
        event
    }

    // ── Rules ─────────────────────────────────────────────────────────────

    fn hold_override(&mut self) -> Option<SignalEvent> {
        let s = &mut self.signal;
        let began = !s.emergency_active;
        s.mode = ControlMode::EmergencyOverride;
        s.emergency_active = true;
        s.vehicle_phase = VehiclePhase::Red;
        s.pedestrian_phase = PedestrianPhase::DontWalk;
        s.walk_timer = 0;
        s.walk_extensions = 0;
        began.then_some(SignalEvent::OverrideBegan)
    }

    fn tick_walk(&mut self, demand: &Demand) -> Option<SignalEvent> {
        let s = &mut self.signal;
        if s.walk_timer > 0 {
            s.walk_timer -= 1;
            return None;
        }
        let pending = demand.pedestrians_waiting + demand.pedestrians_crossing;
        if pending > 0 && s.walk_extensions < self.timing.walk_extension_cap {
            s.walk_extensions += 1;
            return Some(SignalEvent::WalkExtended);
        }
        self.begin_green();
        Some(SignalEvent::WalkEnded)
    }

    fn tick_cycle(&mut self, demand: &Demand) -> Option<SignalEvent> {
        // Actuated GREEN has no expiry; the timer stays where it was loaded.
        let holds_green =
            self.timing.policy == SignalPolicy::Actuated && self.signal.is_green();

        let flipped = if holds_green {
            false
        } else if self.signal.phase_timer == 0 {
            let next = self.signal.vehicle_phase.opposite();
            self.begin_timed(next);
            true
        } else {
            self.signal.phase_timer -= 1;
            false
        };

        let s = &mut self.signal;
        s.pedestrian_phase = if !s.is_green() && demand.pedestrians_waiting > 0 {
            PedestrianPhase::Walk
        } else {
            PedestrianPhase::DontWalk
        };
        flipped.then_some(SignalEvent::PhaseFlipped(s.vehicle_phase))
    }

    // ── Phase entry ───────────────────────────────────────────────────────

    /// Enter timed `phase` on the current tick (which counts toward it).
    fn begin_timed(&mut self, phase: VehiclePhase) {
        let s = &mut self.signal;
        s.mode = ControlMode::Cycling;
        s.vehicle_phase = phase;
        s.pedestrian_phase = PedestrianPhase::DontWalk;
        s.phase_timer = self.timing.duration(phase).saturating_sub(1);
        s.walk_timer = 0;
        s.walk_extensions = 0;
    }

    fn begin_green(&mut self) {
        self.begin_timed(VehiclePhase::Green);
    }

    fn begin_walk(&mut self) {
        let s = &mut self.signal;
        s.mode = ControlMode::PedestrianWalk;
        s.vehicle_phase = VehiclePhase::Red;
        s.pedestrian_phase = PedestrianPhase::Walk;
        s.walk_timer = self.timing.walk_duration.saturating_sub(1);
        s.walk_extensions = 0;
    }
}
