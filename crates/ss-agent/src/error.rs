use ss_core::{AgentId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid endowment for agent {agent}: {reason}")]
    InvalidEndowment { agent: AgentId, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AgentResult<T> = Result<T, AgentError>;
