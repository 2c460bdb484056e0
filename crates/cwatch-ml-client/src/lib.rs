//! Client for the Gemini multimodal inference service.
//!
//! Every call is a fresh, stateless request/response round-trip: one user
//! turn, no retained conversation context. The orchestrator consumes this
//! through the `Inference` trait so tests can substitute a stub.

pub mod client;
pub mod error;
pub mod types;

pub use client::{GeminiClient, GeminiConfig, Inference};
pub use error::{MlError, MlResult};
pub use types::Part;
