//! Grid-subsystem error type.

use thiserror::Error;

/// Errors produced by `gp-grid` construction.  Queries never error — invalid
/// inputs degrade (out-of-bounds cells are not walkable, bad path goals fail
/// closed to a stay-in-place path).
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} are empty or negative")]
    EmptyGrid { width: i32, height: i32 },

    #[error("wall bitmap has {got} cells, expected {expected}")]
    BitmapSizeMismatch { expected: usize, got: usize },
}

pub type GridResult<T> = Result<T, GridError>;
