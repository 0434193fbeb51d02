//! Configuration error type.
//!
//! Sub-crates define their own error enums (`GridError`, `SimError`, …) and
//! wrap `ConfigError` as one variant where construction can fail.

use thiserror::Error;

/// Out-of-range construction parameters.  Always fatal: a simulation is never
/// built from a config that fails [`SimConfig::validate`][crate::SimConfig::validate].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("{name} must be a positive integer")]
    NotPositive { name: &'static str },

    #[error("grid {width}x{height} is too small: need at least 3x3 for a lane and two sidewalks")]
    GridTooSmall { width: u32, height: u32 },
}

/// Shorthand result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;
