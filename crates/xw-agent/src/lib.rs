//! `xw-agent`: agent records and storage for the crosswalk simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`agent`]   | `Agent`, `AgentBody`, `Vehicle`, `Pedestrian`, state enums, tiers |
//! | [`store`]   | `AgentStore` (id-ordered map of live agents)                    |
//!
//! # Design notes
//!
//! Every agent shares one record shape: a cell, a spawn tick and a wait
//! counter, plus an [`AgentBody`] tag carrying the kind-specific state.  An
//! emergency vehicle is a [`Vehicle`] with `is_emergency` set, not a separate
//! type, so every vehicle rule applies to it unless a rule explicitly checks
//! the flag.
//!
//! Records are only mutated by the scheduler's apply phase, through
//! [`Agent::record_move`] and [`Agent::record_hold`].  Behavior code reads
//! them through `&AgentStore`.

pub mod agent;
pub mod store;

#[cfg(test)]
mod tests;

pub use agent::{
    Agent, AgentBody, Pedestrian, PedestrianState, PedestrianTier, Vehicle, VehicleState,
    WaitTier,
};
pub use store::AgentStore;
