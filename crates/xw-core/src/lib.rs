//! `xw-core`: foundational types for the `crosswalk` intersection simulator.
//!
//! This crate is a dependency of every other `xw-*` crate.  It intentionally
//! has no `xw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`cell`]        | `Cell` grid coordinate, `Heading`                     |
//! | [`kind`]        | `AgentKind` enum                                      |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `SimConfig`, `SignalPolicy`, validation               |
//! | [`rng`]         | `SimRng` (spawn draws)                                |
//! | [`error`]       | `ConfigError`, `ConfigResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, Heading};
pub use config::{SignalPolicy, SimConfig};
pub use error::{ConfigError, ConfigResult};
pub use ids::AgentId;
pub use kind::AgentKind;
pub use rng::SimRng;
pub use time::{SimClock, Tick};
