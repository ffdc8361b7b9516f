use thiserror::Error;

use ss_core::{AgentId, CoreError};
use ss_grid::GridError;

#[derive(Debug, Error)]
pub enum EthicsError {
    /// Every cell the agent could consider was filtered out.
    #[error("agent {0} has no admissible candidate cells")]
    NoCandidates(AgentId),

    #[error("cell cache of agent {agent} is inconsistent: {detail}")]
    InconsistentCache { agent: AgentId, detail: &'static str },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type EthicsResult<T> = Result<T, EthicsError>;
