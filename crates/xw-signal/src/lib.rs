//! `xw-signal`: the intersection's signal controller.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`phase`]      | `VehiclePhase`, `PedestrianPhase`, `ControlMode`          |
//! | [`controller`] | `Controller`, `Signal`, `SignalTiming`, `Demand`, `SignalEvent` |
//!
//! # Design notes
//!
//! The controller is a single state machine evaluated once per tick, before
//! any agent decides.  Its input is a [`Demand`] measured by the scheduler on
//! the current snapshot; its output is the updated [`Signal`], which agents
//! only ever see through a shared reference.  Rules, highest priority first:
//!
//! 1. **Emergency override**: any outstanding priority request forces
//!    RED / DONT_WALK.  The first tick without a request clears the override
//!    and starts a fresh GREEN.
//! 2. **Pedestrian walk**: GREEN with a waiting pedestrian starts a WALK of
//!    `walk_duration` ticks, extendable one tick at a time (up to
//!    `walk_extension_cap`) while pedestrians are still waiting or crossing.
//! 3. **Cycling**: under [`SignalPolicy::Actuated`][xw_core::SignalPolicy]
//!    (the default) GREEN simply holds; a RED start runs out `red_duration`
//!    first.  Under `SignalPolicy::Timed`, GREEN for `green_duration`, RED
//!    for `red_duration`.  WALK during RED whenever someone is waiting.

pub mod controller;
pub mod phase;

#[cfg(test)]
mod tests;

pub use controller::{Controller, Demand, Signal, SignalEvent, SignalTiming};
pub use phase::{ControlMode, PedestrianPhase, VehiclePhase};
