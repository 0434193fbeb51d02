//! Unit tests for xw-signal.

use xw_core::{SignalPolicy, SimConfig};

use crate::{
    ControlMode, Controller, Demand, PedestrianPhase, SignalEvent, SignalTiming, VehiclePhase,
};

fn timing() -> SignalTiming {
    SignalTiming::from(&SimConfig::default())
}

fn timed() -> SignalTiming {
    SignalTiming { policy: SignalPolicy::Timed, ..timing() }
}

fn quiet() -> Demand {
    Demand::default()
}

fn waiting(n: u32) -> Demand {
    Demand { pedestrians_waiting: n, ..Demand::default() }
}

fn emergency() -> Demand {
    Demand { priority_requests: 1, ..Demand::default() }
}

// ── Actuated control ──────────────────────────────────────────────────────────

#[cfg(test)]
mod actuated_tests {
    use super::*;

    #[test]
    fn green_holds_without_demand() {
        let mut c = Controller::new(timing());
        for tick in 0..1_000 {
            assert_eq!(c.update(&quiet()), None, "tick {tick}");
            assert!(c.signal().is_green(), "tick {tick}");
            assert_eq!(c.signal().pedestrian_phase(), PedestrianPhase::DontWalk);
        }
        assert_eq!(c.signal().phase_timer(), 10);
        assert_eq!(c.signal().mode(), ControlMode::Cycling);
    }

    #[test]
    fn red_start_runs_out_then_green_holds() {
        let mut c = Controller::with_initial_phase(timing(), VehiclePhase::Red);
        for _ in 0..10 {
            c.update(&quiet());
            assert!(!c.signal().is_green());
        }
        assert_eq!(c.update(&quiet()), Some(SignalEvent::PhaseFlipped(VehiclePhase::Green)));
        for _ in 0..100 {
            assert_eq!(c.update(&quiet()), None);
            assert!(c.signal().is_green());
        }
    }

    #[test]
    fn walk_ends_back_in_held_green() {
        let mut c = Controller::new(timing());
        c.update(&waiting(1));
        while c.signal().is_walk() {
            c.update(&quiet());
        }
        for _ in 0..50 {
            c.update(&quiet());
            assert!(c.signal().is_green());
        }
    }

    #[test]
    fn override_then_green_holds() {
        let mut c = Controller::new(timing());
        c.update(&emergency());
        assert_eq!(c.update(&quiet()), Some(SignalEvent::OverrideCleared));
        for _ in 0..50 {
            assert_eq!(c.update(&quiet()), None);
            assert!(c.signal().is_green());
        }
    }
}

// ── Timed cycling ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod cycle_tests {
    use super::*;

    #[test]
    fn initial_green_lasts_green_duration() {
        let mut c = Controller::new(timed());
        for tick in 0..10 {
            assert_eq!(c.update(&quiet()), None, "tick {tick}");
            assert!(c.signal().is_green(), "tick {tick}");
        }
        assert_eq!(c.update(&quiet()), Some(SignalEvent::PhaseFlipped(VehiclePhase::Red)));
        assert_eq!(c.signal().vehicle_phase(), VehiclePhase::Red);
        assert_eq!(c.signal().mode(), ControlMode::Cycling);
    }

    #[test]
    fn red_lasts_red_duration_then_green() {
        let t = SignalTiming { green_duration: 3, red_duration: 4, ..timed() };
        let mut c = Controller::new(t);
        let phases: Vec<_> = (0..14)
            .map(|_| {
                c.update(&quiet());
                c.signal().vehicle_phase()
            })
            .collect();

        use VehiclePhase::{Green as G, Red as R};
        assert_eq!(phases, vec![G, G, G, R, R, R, R, G, G, G, R, R, R, R]);
    }

    #[test]
    fn initial_red_phase() {
        let mut c = Controller::with_initial_phase(timed(), VehiclePhase::Red);
        assert_eq!(c.signal().vehicle_phase(), VehiclePhase::Red);
        for _ in 0..10 {
            c.update(&quiet());
            assert!(!c.signal().is_green());
        }
        assert_eq!(c.update(&quiet()), Some(SignalEvent::PhaseFlipped(VehiclePhase::Green)));
    }

    #[test]
    fn timed_red_shows_walk_only_when_someone_waits() {
        let mut c = Controller::with_initial_phase(timing(), VehiclePhase::Red);
        c.update(&quiet());
        assert_eq!(c.signal().pedestrian_phase(), PedestrianPhase::DontWalk);

        c.update(&waiting(2));
        assert_eq!(c.signal().pedestrian_phase(), PedestrianPhase::Walk);
        assert_eq!(c.signal().mode(), ControlMode::Cycling);

        c.update(&quiet());
        assert_eq!(c.signal().pedestrian_phase(), PedestrianPhase::DontWalk);
    }

    #[test]
    fn timing_from_config() {
        let cfg = SimConfig {
            signal_policy:      SignalPolicy::Timed,
            green_duration:     7,
            walk_extension_cap: 2,
            ..SimConfig::default()
        };
        let t = SignalTiming::from(&cfg);
        assert_eq!(t.policy, SignalPolicy::Timed);
        assert_eq!(t.green_duration, 7);
        assert_eq!(t.red_duration, cfg.red_duration);
        assert_eq!(t.walk_duration, cfg.walk_duration);
        assert_eq!(t.walk_extension_cap, 2);
    }
}

// ── Pedestrian walk ───────────────────────────────────────────────────────────

#[cfg(test)]
mod walk_tests {
    use super::*;

    #[test]
    fn waiting_pedestrian_during_green_starts_walk() {
        let mut c = Controller::new(timing());
        assert_eq!(c.update(&waiting(1)), Some(SignalEvent::WalkStarted));
        let s = c.signal();
        assert_eq!(s.vehicle_phase(), VehiclePhase::Red);
        assert_eq!(s.pedestrian_phase(), PedestrianPhase::Walk);
        assert_eq!(s.mode(), ControlMode::PedestrianWalk);
    }

    #[test]
    fn walk_lasts_walk_duration_without_demand() {
        let mut c = Controller::new(timing());
        c.update(&waiting(1));
        // WalkStarted tick plus four more.
        for _ in 1..5 {
            assert_eq!(c.update(&quiet()), None);
            assert!(c.signal().is_walk());
        }
        assert_eq!(c.update(&quiet()), Some(SignalEvent::WalkEnded));
        assert!(c.signal().is_green());
        assert_eq!(c.signal().pedestrian_phase(), PedestrianPhase::DontWalk);
        assert_eq!(c.signal().phase_timer(), 9);
    }

    #[test]
    fn extensions_are_capped() {
        let mut c = Controller::new(timing());
        c.update(&waiting(1));
        for _ in 1..5 {
            c.update(&waiting(1));
        }

        let crossing = Demand { pedestrians_crossing: 1, ..Demand::default() };
        for n in 1..=5 {
            assert_eq!(c.update(&crossing), Some(SignalEvent::WalkExtended));
            assert_eq!(c.signal().walk_extensions(), n);
            assert!(c.signal().is_walk());
        }
        assert_eq!(c.update(&crossing), Some(SignalEvent::WalkEnded));
        assert!(c.signal().is_green());
        assert_eq!(c.signal().walk_extensions(), 0);
    }

    #[test]
    fn zero_cap_never_extends() {
        let t = SignalTiming { walk_duration: 1, walk_extension_cap: 0, ..timing() };
        let mut c = Controller::new(t);
        assert_eq!(c.update(&waiting(1)), Some(SignalEvent::WalkStarted));
        assert_eq!(c.update(&waiting(1)), Some(SignalEvent::WalkEnded));
        assert!(c.signal().is_green());
    }

    #[test]
    fn walk_never_shown_with_green() {
        let mut c = Controller::new(SignalTiming {
            policy:         SignalPolicy::Timed,
            green_duration: 2,
            red_duration: 2,
            walk_duration: 2,
            walk_extension_cap: 1,
        });
        for tick in 0..200u32 {
            let d = Demand {
                priority_requests:    u32::from(tick % 37 < 3),
                pedestrians_waiting:  tick % 3,
                pedestrians_crossing: tick % 5 % 2,
            };
            c.update(&d);
            let s = c.signal();
            assert!(!(s.is_walk() && s.is_green()), "tick {tick}");
        }
    }
}

// ── Emergency override ────────────────────────────────────────────────────────

#[cfg(test)]
mod override_tests {
    use super::*;

    #[test]
    fn request_forces_red_dont_walk() {
        let mut c = Controller::new(timing());
        c.update(&quiet());
        assert_eq!(c.update(&emergency()), Some(SignalEvent::OverrideBegan));
        let s = c.signal();
        assert_eq!(s.vehicle_phase(), VehiclePhase::Red);
        assert_eq!(s.pedestrian_phase(), PedestrianPhase::DontWalk);
        assert_eq!(s.mode(), ControlMode::EmergencyOverride);
        assert!(s.emergency_active());
        assert_eq!(s.emergency_requests(), 1);
    }

    #[test]
    fn override_held_while_requested() {
        let mut c = Controller::new(timing());
        c.update(&emergency());
        for _ in 0..30 {
            let d = Demand { priority_requests: 2, pedestrians_waiting: 3, ..Demand::default() };
            assert_eq!(c.update(&d), None);
            assert!(c.signal().emergency_active());
            assert!(!c.signal().is_walk());
            assert!(!c.signal().is_green());
        }
    }

    #[test]
    fn clearing_starts_fresh_green() {
        let mut c = Controller::new(timing());
        c.update(&emergency());
        c.update(&emergency());
        assert_eq!(c.update(&waiting(4)), Some(SignalEvent::OverrideCleared));
        let s = c.signal();
        assert!(s.is_green());
        assert!(!s.emergency_active());
        assert_eq!(s.mode(), ControlMode::Cycling);
        assert_eq!(s.phase_timer(), 9);
        assert_eq!(s.emergency_requests(), 0);
    }

    #[test]
    fn override_interrupts_walk() {
        let mut c = Controller::new(timing());
        c.update(&waiting(1));
        assert!(c.signal().is_walk());
        assert_eq!(c.update(&emergency()), Some(SignalEvent::OverrideBegan));
        assert!(!c.signal().is_walk());
        assert_eq!(c.signal().walk_timer(), 0);
    }
}
