//! Agent intents: what an agent wants to do this tick.

use xw_core::Cell;

/// The single action an agent requests during the decide phase.
///
/// Intents are produced by [`BehaviorModel::decide`][crate::BehaviorModel::decide]
/// and applied by xw-sim.  An intent is a request, not a guarantee: a
/// `MoveTo` whose target has been taken by an earlier-applied agent is
/// downgraded to `Hold`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Stay in the current cell; the wait counter increments.
    Hold,
    /// Move to `cell`; the wait counter resets.
    MoveTo(Cell),
    /// Leave the grid past the right edge.
    Exit,
}
