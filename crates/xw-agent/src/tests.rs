//! Unit tests for xw-agent.

use xw_core::{AgentId, AgentKind, Cell, Heading, Tick};

use crate::{
    Agent, AgentBody, AgentStore, Pedestrian, PedestrianState, PedestrianTier, Vehicle,
    VehicleState, WaitTier,
};

const CROSSING: u32 = 15;

fn state(a: &Agent) -> PedestrianState {
    a.pedestrian().map(|p| p.state).unwrap()
}

fn pedestrian_body(cell: Cell, target_row: u32) -> AgentBody {
    AgentBody::Pedestrian(Pedestrian::new(cell, target_row, CROSSING))
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut store = AgentStore::new();
        let a = store.spawn(Cell::new(0, 1), Tick(0), AgentBody::Vehicle(Vehicle::regular()));
        let b = store.spawn(Cell::new(1, 1), Tick(0), AgentBody::Vehicle(Vehicle::regular()));
        assert_eq!((a, b), (AgentId(0), AgentId(1)));

        assert!(store.remove(a).is_some());
        let c = store.spawn(Cell::new(0, 1), Tick(1), AgentBody::Vehicle(Vehicle::regular()));
        assert_eq!(c, AgentId(2));
        assert_eq!(store.total_spawned(), 3);
        assert_eq!(store.len(), 2);
        assert!(!store.contains(a));
    }

    #[test]
    fn iteration_is_ascending() {
        let mut store = AgentStore::new();
        for x in 0..5 {
            store.spawn(Cell::new(x, 1), Tick(0), AgentBody::Vehicle(Vehicle::regular()));
        }
        store.remove(AgentId(2));
        let ids: Vec<_> = store.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(3), AgentId(4)]);
        assert_eq!(store.ids(), ids);
    }

    #[test]
    fn counts_by_kind() {
        let mut store = AgentStore::new();
        store.spawn(Cell::new(0, 1), Tick(0), AgentBody::Vehicle(Vehicle::regular()));
        store.spawn(Cell::new(1, 1), Tick(0), AgentBody::Vehicle(Vehicle::emergency()));
        store.spawn(Cell::new(0, 0), Tick(0), pedestrian_body(Cell::new(0, 0), 2));
        store.spawn(Cell::new(29, 2), Tick(0), pedestrian_body(Cell::new(29, 2), 0));

        assert_eq!(store.count(AgentKind::Vehicle), 1);
        assert_eq!(store.count(AgentKind::EmergencyVehicle), 1);
        assert_eq!(store.count(AgentKind::Pedestrian), 2);
        assert!(store.get(AgentId(1)).is_some_and(|a| a.is_emergency()));
        assert!(store.get(AgentId(9)).is_none());
    }
}

// ── Vehicles ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vehicle_tests {
    use super::*;

    #[test]
    fn wait_counter_resets_on_move() {
        let mut store = AgentStore::new();
        let id = store.spawn(Cell::new(3, 1), Tick(0), AgentBody::Vehicle(Vehicle::regular()));
        let a = store.get_mut(id).unwrap();

        a.record_hold();
        a.record_hold();
        assert_eq!(a.wait_counter, 2);
        assert_eq!(a.vehicle().unwrap().state, VehicleState::Stopped);

        a.record_move(Cell::new(4, 1), CROSSING);
        assert_eq!(a.wait_counter, 0);
        assert_eq!(a.cell, Cell::new(4, 1));
        assert_eq!(a.vehicle().unwrap().state, VehicleState::Moving);

        a.record_exit();
        assert_eq!(a.vehicle().unwrap().state, VehicleState::Exited);
    }

    #[test]
    fn wait_tiers() {
        assert_eq!(WaitTier::from_wait(0, 5), WaitTier::Free);
        assert_eq!(WaitTier::from_wait(1, 5), WaitTier::Short);
        assert_eq!(WaitTier::from_wait(4, 5), WaitTier::Short);
        assert_eq!(WaitTier::from_wait(5, 5), WaitTier::Long);
        assert_eq!(WaitTier::from_wait(50, 5), WaitTier::Long);
    }

    #[test]
    fn emergency_requests_until_past_crossing() {
        let mut store = AgentStore::new();
        let id = store.spawn(Cell::new(0, 1), Tick(0), AgentBody::Vehicle(Vehicle::emergency()));
        let ev = store.get_mut(id).unwrap();
        assert_eq!(ev.kind(), AgentKind::EmergencyVehicle);
        assert!(ev.requests_priority(CROSSING));

        ev.record_move(Cell::new(CROSSING, 1), CROSSING);
        assert!(ev.requests_priority(CROSSING));
        assert!(!ev.mark_cleared(CROSSING));

        ev.record_move(Cell::new(CROSSING + 1, 1), CROSSING);
        assert!(ev.mark_cleared(CROSSING));
        assert!(!ev.mark_cleared(CROSSING), "cleared only once");
        assert!(!ev.requests_priority(CROSSING));
    }

    #[test]
    fn regular_vehicle_never_requests_or_clears() {
        let mut store = AgentStore::new();
        let id = store.spawn(Cell::new(20, 1), Tick(0), AgentBody::Vehicle(Vehicle::regular()));
        let car = store.get_mut(id).unwrap();
        assert!(car.is_regular_vehicle());
        assert!(!car.requests_priority(CROSSING));
        assert!(!car.mark_cleared(CROSSING));
        assert_eq!(car.pedestrian_tier(), None);
    }
}

// ── Pedestrians ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod pedestrian_tests {
    use super::*;

    #[test]
    fn heading_points_at_crossing() {
        let left = Pedestrian::new(Cell::new(0, 0), 2, CROSSING);
        let right = Pedestrian::new(Cell::new(29, 2), 0, CROSSING);
        assert_eq!(left.heading, Heading::East);
        assert_eq!(right.heading, Heading::West);
        assert_eq!(left.state, PedestrianState::Approaching);

        let on_column = Pedestrian::new(Cell::new(CROSSING, 0), 2, CROSSING);
        assert_eq!(on_column.state, PedestrianState::Waiting);
    }

    #[test]
    fn full_walk_state_sequence() {
        let mut store = AgentStore::new();
        let start = Cell::new(CROSSING - 1, 0);
        let id = store.spawn(start, Tick(0), pedestrian_body(start, 2));
        let p = store.get_mut(id).unwrap();

        p.record_move(Cell::new(CROSSING, 0), CROSSING);
        assert_eq!(state(p), PedestrianState::Waiting);
        assert!(p.is_waiting_pedestrian());

        p.record_hold();
        assert_eq!(p.pedestrian_tier(), Some(PedestrianTier::Waiting));

        p.record_move(Cell::new(CROSSING, 1), CROSSING);
        assert_eq!(state(p), PedestrianState::Crossing);
        assert_eq!(p.wait_counter, 0);
        assert_eq!(p.pedestrian_tier(), Some(PedestrianTier::Crossing));

        p.record_move(Cell::new(CROSSING, 2), CROSSING);
        assert_eq!(state(p), PedestrianState::Departing);

        p.record_move(Cell::new(CROSSING + 1, 2), CROSSING);
        assert_eq!(state(p), PedestrianState::Departing);
        assert_eq!(p.pedestrian_tier(), Some(PedestrianTier::Walking));

        p.record_exit();
        assert_eq!(state(p), PedestrianState::Exited);
    }

    #[test]
    fn held_waiting_pedestrian_stays_waiting() {
        let mut store = AgentStore::new();
        let start = Cell::new(CROSSING, 2);
        let id = store.spawn(start, Tick(3), pedestrian_body(start, 0));
        let p = store.get_mut(id).unwrap();
        for _ in 0..4 {
            p.record_hold();
        }
        assert_eq!(p.pedestrian().unwrap().state, PedestrianState::Waiting);
        assert_eq!(p.wait_counter, 4);
    }
}
