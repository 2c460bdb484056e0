//! Media risk analysis orchestrator.
//!
//! This crate provides:
//! - The analyzer driving the independent video and audio branches
//! - Prompt construction for the multimodal inference service
//! - Durable JSON report persistence
//! - Worker configuration from the environment

pub mod analyzer;
pub mod config;
pub mod error;
pub mod prompt;
pub mod report_store;

pub use analyzer::Analyzer;
pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use report_store::ReportStore;
