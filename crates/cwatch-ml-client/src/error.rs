//! Inference client error types.

use thiserror::Error;

pub type MlResult<T> = Result<T, MlError>;

#[derive(Debug, Error)]
pub enum MlError {
    #[error("GEMINI_API_KEY not set")]
    MissingApiKey,

    #[error("Inference API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("No content in inference response")]
    EmptyResponse,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
