//! The `BehaviorModel` trait.

use xw_agent::Agent;

use crate::{Intent, SimContext};

/// Pluggable decision rules.
///
/// The simulation loop may call `decide` for many agents in parallel via
/// Rayon, so implementations must be `Send + Sync`.  Per-agent state lives on
/// the [`Agent`] record, never in the model.
pub trait BehaviorModel: Send + Sync + 'static {
    /// Decide what `agent` does this tick, reading only `ctx`.
    fn decide(&self, agent: &Agent, ctx: &SimContext<'_>) -> Intent;
}
