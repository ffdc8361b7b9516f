//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]` where they need to surface lookup failures.

use thiserror::Error;

use crate::{AgentId, CellId};

/// Lookup and configuration failures common to all `ss-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent {0} is no longer alive")]
    AgentRemoved(AgentId),

    #[error("cell {0} not found")]
    CellNotFound(CellId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ss-core`.
pub type CoreResult<T> = Result<T, CoreError>;
