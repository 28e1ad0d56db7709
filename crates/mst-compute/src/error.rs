use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("failed to spawn compute worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("compute worker disconnected")]
    Disconnected,
}

pub type ComputeResult<T> = Result<T, ComputeError>;
