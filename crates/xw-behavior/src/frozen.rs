//! A behavior model in which nobody moves.

use xw_agent::Agent;

use crate::{BehaviorModel, Intent, SimContext};

/// A [`BehaviorModel`] that always returns [`Intent::Hold`].
///
/// Useful in tests that need agents to stay exactly where they were placed
/// while the signal and the metrics keep running.
pub struct FrozenBehavior;

impl BehaviorModel for FrozenBehavior {
    fn decide(&self, _agent: &Agent, _ctx: &SimContext<'_>) -> Intent {
        Intent::Hold
    }
}
