//! Grid error type.

use thiserror::Error;

use ss_core::{AgentId, CellId};

use crate::GridPos;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("position {0} lies outside the grid")]
    OutOfBounds(GridPos),

    #[error("cell {0} not found in grid")]
    CellNotFound(CellId),

    #[error("cell {cell} is already occupied by {occupant}")]
    Occupied { cell: CellId, occupant: AgentId },

    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    EmptyGrid { width: u32, height: u32 },
}

pub type GridResult<T> = Result<T, GridError>;
