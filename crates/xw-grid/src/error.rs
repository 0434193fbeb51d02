//! Grid error type.

use thiserror::Error;

use xw_core::{AgentId, Cell};

/// Errors produced by `xw-grid`.
///
/// The scheduler recovers from all of them locally (the spawn or move is
/// skipped) and never surfaces them from `step()`.  Manual placement calls
/// return them to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {cell} is occupied by {occupant}")]
    OccupiedCell { cell: Cell, occupant: AgentId },

    #[error("cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: u32, height: u32 },

    #[error("{agent} is not in cell {cell}")]
    NotPresent { agent: AgentId, cell: Cell },
}

pub type GridResult<T> = Result<T, GridError>;
