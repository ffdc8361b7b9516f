use thiserror::Error;

use ss_agent::AgentError;
use ss_core::CoreError;
use ss_ethics::EthicsError;
use ss_grid::GridError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Ethics(#[from] EthicsError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
