use mst_compute::ComputeError;
use mst_core::CoreError;
use thiserror::Error;

use crate::LayerId;

/// A failed draw call.  The scheduler logs these and keeps going.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("layer {0} does not exist")]
    UnknownLayer(LayerId),

    #[error("renderer backend error: {0}")]
    Backend(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum AnimError {
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("compute error: {0}")]
    Compute(#[from] ComputeError),
}

pub type AnimResult<T> = Result<T, AnimError>;
