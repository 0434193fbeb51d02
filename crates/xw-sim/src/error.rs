use thiserror::Error;

use xw_core::ConfigError;
use xw_grid::GridError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid simulation configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("placement failed: {0}")]
    Grid(#[from] GridError),
}

pub type SimResult<T> = Result<T, SimError>;
