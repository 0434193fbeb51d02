//! `xw-grid`: the 2-D occupancy grid shared by all agents.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Grid`, `Occupant`                                          |
//! | [`error`]   | `GridError`, `GridResult<T>`                                |
//!
//! # Blocking rules
//!
//! A cell holds at most one vehicle and any number of pedestrians:
//!
//! - a vehicle is blocked by any vehicle or any pedestrian in the target cell
//!   (pedestrians on the crosswalk stop traffic);
//! - a pedestrian is blocked only by a vehicle (walkers share sidewalk and
//!   crosswalk cells).
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use grid::{Grid, Occupant};
