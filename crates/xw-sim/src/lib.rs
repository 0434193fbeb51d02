//! `xw-sim`: tick loop orchestrator for the crosswalk simulator.
//!
//! # Tick loop
//!
//! ```text
//! every step():
//!   ① Spawn    : Bernoulli draws for vehicle, pedestrian, emergency vehicle;
//!                each spawn needs an empty entry cell, and no emergency
//!                vehicle spawns while an override is active.
//!   ② Signal   : Controller::update(demand measured on the grid).
//!   ③ Decide   : BehaviorModel::decide for every live agent against one
//!                shared SimContext (parallel with the `parallel` feature).
//!   ④ Apply    : pedestrians, then vehicles, ascending AgentId:
//!                  Hold       → wait_counter += 1
//!                  MoveTo(c)  → relocate, or hold if c was taken
//!                  Exit       → remove, update counters, on_agent_exit
//!   ⑤ Metrics  : append a TickMetrics row to the MetricsSeries.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decide phase on Rayon's thread pool.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use xw_behavior::IntersectionRules;
//! use xw_core::SimConfig;
//! use xw_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), IntersectionRules).build()?;
//! sim.run_ticks(500, &mut NoopObserver);
//! println!("avg travel time {:.1}", sim.compute_avg_travel_time());
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod sim;
pub mod view;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{MetricsSeries, ScoreWeights, TickMetrics};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use view::AgentView;
