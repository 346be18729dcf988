//! Engine error type.
//!
//! Everything here is a *setup* failure (or, under `StatusPolicy::Reject`,
//! a consistency failure).  In-turn conditions never surface as errors:
//! unreachable targets degrade to staying put and invalid skills to no-ops.

use thiserror::Error;

use gp_core::{ActorId, Cell, CoreError};
use gp_grid::GridError;

use crate::action::StatusUpdate;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("roster is empty")]
    EmptyRoster,

    #[error("actor {id} spawn {cell} is out of bounds or on a wall")]
    BadSpawn { id: ActorId, cell: Cell },

    #[error("two actors share spawn cell {0}")]
    SpawnCollision(Cell),

    #[error("element cell {0} is out of bounds or on a wall")]
    BadElementCell(Cell),

    #[error("two elements share cell {0}")]
    ElementCollision(Cell),

    #[error("the world needs exactly one exit, found {0}")]
    ExitCount(usize),

    #[error("status update {update:?} does not apply to actor {id}")]
    InvalidStatusUpdate { id: ActorId, update: StatusUpdate },
}

pub type EngineResult<T> = Result<T, EngineError>;
