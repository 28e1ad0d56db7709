//! Engine error type.
//!
//! Only explicit matrix construction can fail; matrices built from points
//! are valid by construction.

use thiserror::Error;

/// Errors produced by `mst-engine`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("row {row} has {got} entries, expected {expected}")]
    NotSquare { row: usize, expected: usize, got: usize },

    #[error("entry ({i}, {j}) = {value} is not a finite non-negative distance")]
    InvalidDistance { i: usize, j: usize, value: f64 },

    #[error("diagonal entry ({0}, {0}) is not zero")]
    NonZeroDiagonal(usize),

    #[error("entries ({i}, {j}) and ({j}, {i}) differ")]
    Asymmetric { i: usize, j: usize },
}

pub type EngineResult<T> = Result<T, EngineError>;
