//! Worker error types.
//!
//! Branch-level decode and inference failures never become a
//! `WorkerError`; they are absorbed into the report as null fields. What
//! does surface here is the asymmetric remainder: configuration problems
//! (fatal before any branch starts) and persistence failures (fatal for
//! the whole invocation).

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Media error: {0}")]
    Media(#[from] cwatch_media::MediaError),

    #[error("Inference error: {0}")]
    Inference(#[from] cwatch_ml_client::MlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
