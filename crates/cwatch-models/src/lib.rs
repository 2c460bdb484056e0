//! Shared data models for the ClipWatch pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Analysis reports and per-branch outcomes
//! - Acoustic feature vectors
//! - Media inputs and container-hint validation

pub mod features;
pub mod media;
pub mod report;

// Re-export common types
pub use features::AcousticFeatureVector;
pub use media::{MediaInput, MediaInputError, AUDIO_EXTENSIONS, VIDEO_EXTENSIONS};
pub use report::{AnalysisReport, BranchFailure, BranchOutcome, Modality};
