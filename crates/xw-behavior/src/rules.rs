//! The intersection's decision rules.
//!
//! # Vehicles
//!
//! First matching rule wins:
//!
//! | Condition                                              | Intent        |
//! |--------------------------------------------------------|---------------|
//! | before the crossing column while an override is active | `Hold`        |
//! | next cell is the crossing column and the light is RED  | `Hold`        |
//! | next cell is past the right edge                       | `Exit`        |
//! | next cell blocked, or entering a busy crosswalk        | `Hold`        |
//! | otherwise                                              | `MoveTo(next)`|
//!
//! # Emergency vehicles
//!
//! Ignore the signal and the override.  Regular vehicles held by the
//! override pull aside, so an emergency vehicle passes over the contiguous
//! run of them directly ahead and lands on the first cell beyond the run.
//! Anything else in the way holds it.
//!
//! # Pedestrians
//!
//! Walk along the sidewalk to the crossing column, wait there for WALK
//! (and for any override to end), cross to the far sidewalk without
//! stopping for the signal, then walk right until they leave the grid.  Only
//! a vehicle in the next cell holds a walking pedestrian.

use xw_agent::{Agent, Pedestrian, PedestrianState};
use xw_core::{Cell, Heading};

use crate::{BehaviorModel, Intent, SimContext};

/// The standard crosswalk rules.
pub struct IntersectionRules;

impl BehaviorModel for IntersectionRules {
    fn decide(&self, agent: &Agent, ctx: &SimContext<'_>) -> Intent {
        if let Some(p) = agent.pedestrian() {
            return pedestrian(agent, p, ctx);
        }
        if agent.is_emergency() {
            emergency_vehicle(agent, ctx)
        } else {
            vehicle(agent, ctx)
        }
    }
}

// ── Vehicles ──────────────────────────────────────────────────────────────────

fn vehicle(agent: &Agent, ctx: &SimContext<'_>) -> Intent {
    let cc = ctx.geometry.crossing_column;
    let x = agent.cell.x;

    if x < cc && ctx.signal.emergency_active() {
        return Intent::Hold;
    }
    let entering_crossing = x + 1 == cc;
    if entering_crossing && !ctx.signal.is_green() {
        return Intent::Hold;
    }
    if x + 1 >= ctx.geometry.width {
        return Intent::Exit;
    }

    let ahead = agent.cell.east();
    if ctx.grid.blocks_vehicle(ahead) || (entering_crossing && ctx.crossing_blocked()) {
        return Intent::Hold;
    }
    Intent::MoveTo(ahead)
}

/// `true` if `cell` holds a regular vehicle pulled aside for an override.
fn is_yielding(cell: Cell, ctx: &SimContext<'_>) -> bool {
    ctx.signal.emergency_active()
        && cell.x < ctx.geometry.crossing_column
        && ctx
            .grid
            .vehicle_at(cell)
            .and_then(|o| ctx.agents.get(o.agent))
            .is_some_and(Agent::is_regular_vehicle)
}

fn emergency_vehicle(agent: &Agent, ctx: &SimContext<'_>) -> Intent {
    if agent.cell.x + 1 >= ctx.geometry.width {
        return Intent::Exit;
    }

    let mut landing = agent.cell.east();
    while is_yielding(landing, ctx) {
        landing = landing.east();
    }
    if !ctx.grid.contains(landing) || ctx.grid.blocks_vehicle(landing) {
        return Intent::Hold;
    }
    Intent::MoveTo(landing)
}

// ── Pedestrians ───────────────────────────────────────────────────────────────

fn pedestrian(agent: &Agent, p: &Pedestrian, ctx: &SimContext<'_>) -> Intent {
    let here = agent.cell;
    match p.state {
        PedestrianState::Approaching => step(here, Some(p.heading), ctx),
        PedestrianState::Waiting => {
            if ctx.signal.emergency_active() || !ctx.signal.is_walk() {
                return Intent::Hold;
            }
            step(here, Heading::toward_y(here.y, p.target_row), ctx)
        }
        PedestrianState::Crossing => {
            match Heading::toward_y(here.y, p.target_row) {
                Some(h) => step(here, Some(h), ctx),
                None => depart(here, ctx),
            }
        }
        PedestrianState::Departing => depart(here, ctx),
        PedestrianState::Exited => Intent::Hold,
    }
}

fn depart(here: Cell, ctx: &SimContext<'_>) -> Intent {
    if here.x + 1 >= ctx.geometry.width {
        return Intent::Exit;
    }
    step(here, Some(Heading::East), ctx)
}

fn step(here: Cell, heading: Option<Heading>, ctx: &SimContext<'_>) -> Intent {
    match heading.and_then(|h| here.neighbor(h)) {
        Some(next) if ctx.grid.contains(next) && !ctx.grid.blocks_pedestrian(next) => {
            Intent::MoveTo(next)
        }
        _ => Intent::Hold,
    }
}
