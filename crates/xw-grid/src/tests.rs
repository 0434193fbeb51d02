//! Unit tests for xw-grid.

use xw_core::{AgentId, AgentKind, Cell};

use crate::{Grid, GridError, Occupant};

fn grid() -> Grid {
    Grid::new(10, 3)
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod place_tests {
    use super::*;

    #[test]
    fn place_and_query_vehicle() {
        let mut g = grid();
        g.place(AgentId(1), AgentKind::Vehicle, Cell::new(4, 1)).unwrap();
        assert_eq!(
            g.occupant_at(Cell::new(4, 1)),
            Some(Occupant { agent: AgentId(1), kind: AgentKind::Vehicle }),
        );
        assert!(g.blocks_vehicle(Cell::new(4, 1)));
        assert!(g.blocks_pedestrian(Cell::new(4, 1)));
        assert!(!g.is_empty(Cell::new(4, 1)));
        assert_eq!(g.vehicle_count(), 1);
    }

    #[test]
    fn vehicle_blocks_vehicle() {
        let mut g = grid();
        g.place(AgentId(1), AgentKind::Vehicle, Cell::new(4, 1)).unwrap();
        let err = g.place(AgentId(2), AgentKind::EmergencyVehicle, Cell::new(4, 1)).unwrap_err();
        assert_eq!(err, GridError::OccupiedCell { cell: Cell::new(4, 1), occupant: AgentId(1) });
    }

    #[test]
    fn pedestrian_blocks_vehicle_but_not_pedestrian() {
        let mut g = grid();
        let crossing = Cell::new(5, 1);
        g.place(AgentId(1), AgentKind::Pedestrian, crossing).unwrap();
        g.place(AgentId(2), AgentKind::Pedestrian, crossing).unwrap();
        assert_eq!(g.pedestrians_at(crossing), &[AgentId(1), AgentId(2)]);

        assert!(g.blocks_vehicle(crossing));
        assert!(!g.blocks_pedestrian(crossing));
        assert!(matches!(
            g.place(AgentId(3), AgentKind::Vehicle, crossing),
            Err(GridError::OccupiedCell { occupant: AgentId(1), .. })
        ));
        assert_eq!(g.pedestrian_count(), 2);
    }

    #[test]
    fn vehicle_blocks_pedestrian() {
        let mut g = grid();
        g.place(AgentId(1), AgentKind::Vehicle, Cell::new(5, 1)).unwrap();
        assert!(g.place(AgentId(2), AgentKind::Pedestrian, Cell::new(5, 1)).is_err());
    }

    #[test]
    fn out_of_bounds_rejected() {
        let mut g = grid();
        let err = g.place(AgentId(1), AgentKind::Vehicle, Cell::new(10, 1)).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { width: 10, height: 3, .. }));
        assert!(!g.contains(Cell::new(10, 1)));
        assert!(!g.contains(Cell::new(0, 3)));
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod query_tests {
    use super::*;

    #[test]
    fn empty_grid_reports_nothing() {
        let g = grid();
        assert_eq!(g.occupant_at(Cell::new(0, 0)), None);
        assert!(g.is_empty(Cell::new(0, 0)));
        assert!(g.pedestrians_at(Cell::new(0, 0)).is_empty());
        assert_eq!(g.width(), 10);
        assert_eq!(g.height(), 3);
    }

    #[test]
    fn out_of_bounds_reads_are_empty() {
        let g = grid();
        assert_eq!(g.occupant_at(Cell::new(99, 99)), None);
        assert!(g.is_empty(Cell::new(99, 0)));
        assert!(!g.blocks_vehicle(Cell::new(10, 1)));
    }

    #[test]
    fn pedestrian_reported_when_no_vehicle() {
        let mut g = grid();
        g.place(AgentId(5), AgentKind::Pedestrian, Cell::new(2, 0)).unwrap();
        assert_eq!(
            g.occupant_at(Cell::new(2, 0)),
            Some(Occupant { agent: AgentId(5), kind: AgentKind::Pedestrian }),
        );
        assert_eq!(g.vehicle_at(Cell::new(2, 0)), None);
    }
}

// ── Removal ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod remove_tests {
    use super::*;

    #[test]
    fn remove_frees_cell() {
        let mut g = grid();
        let c = Cell::new(3, 1);
        g.place(AgentId(1), AgentKind::Vehicle, c).unwrap();
        assert!(g.remove(AgentId(1), c));
        assert!(g.is_empty(c));
        g.place(AgentId(2), AgentKind::Vehicle, c).unwrap();
    }

    #[test]
    fn remove_one_of_many_pedestrians() {
        let mut g = grid();
        let c = Cell::new(5, 0);
        for id in 0..3 {
            g.place(AgentId(id), AgentKind::Pedestrian, c).unwrap();
        }
        assert!(g.remove(AgentId(1), c));
        assert_eq!(g.pedestrians_at(c), &[AgentId(0), AgentId(2)]);
    }

    #[test]
    fn remove_absent_agent_is_false() {
        let mut g = grid();
        g.place(AgentId(1), AgentKind::Vehicle, Cell::new(3, 1)).unwrap();
        assert!(!g.remove(AgentId(2), Cell::new(3, 1)));
        assert!(!g.remove(AgentId(1), Cell::new(4, 1)));
        assert!(!g.remove(AgentId(1), Cell::new(40, 1)));
    }
}

// ── Relocation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod relocate_tests {
    use super::*;

    #[test]
    fn relocate_moves_agent() {
        let mut g = grid();
        g.place(AgentId(1), AgentKind::Vehicle, Cell::new(3, 1)).unwrap();
        g.relocate(AgentId(1), AgentKind::Vehicle, Cell::new(3, 1), Cell::new(4, 1)).unwrap();
        assert!(g.is_empty(Cell::new(3, 1)));
        assert_eq!(g.vehicle_at(Cell::new(4, 1)).map(|o| o.agent), Some(AgentId(1)));
    }

    #[test]
    fn failed_relocate_leaves_agent_in_place() {
        let mut g = grid();
        g.place(AgentId(1), AgentKind::Vehicle, Cell::new(3, 1)).unwrap();
        g.place(AgentId(2), AgentKind::Pedestrian, Cell::new(4, 1)).unwrap();

        let err = g
            .relocate(AgentId(1), AgentKind::Vehicle, Cell::new(3, 1), Cell::new(4, 1))
            .unwrap_err();
        assert_eq!(err, GridError::OccupiedCell { cell: Cell::new(4, 1), occupant: AgentId(2) });
        assert_eq!(g.vehicle_at(Cell::new(3, 1)).map(|o| o.agent), Some(AgentId(1)));
    }

    #[test]
    fn relocate_requires_presence() {
        let mut g = grid();
        let err = g
            .relocate(AgentId(7), AgentKind::Pedestrian, Cell::new(0, 0), Cell::new(1, 0))
            .unwrap_err();
        assert_eq!(err, GridError::NotPresent { agent: AgentId(7), cell: Cell::new(0, 0) });
        assert!(g.is_empty(Cell::new(1, 0)));
    }

    #[test]
    fn check_reports_without_mutating() {
        let mut g = grid();
        g.place(AgentId(1), AgentKind::Vehicle, Cell::new(2, 1)).unwrap();
        assert!(g.check(AgentKind::Pedestrian, Cell::new(2, 0)).is_ok());
        assert!(g.check(AgentKind::Pedestrian, Cell::new(2, 1)).is_err());
        assert!(g.is_empty(Cell::new(2, 0)));
    }
}
