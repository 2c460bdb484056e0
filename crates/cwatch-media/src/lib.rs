//! FFmpeg CLI wrapper for media decoding and feature derivation.
//!
//! This crate provides:
//! - FFprobe-based media probing
//! - The `VideoSource` decode boundary with an FFmpeg-backed implementation
//! - Evenly spaced frame sampling up to a cap
//! - Audio waveform decoding and acoustic feature computation

pub mod audio;
pub mod error;
pub mod probe;
pub mod sampler;
pub mod video;

pub use audio::{compute_features, extract_features, FEATURE_SAMPLE_RATE};
pub use error::{MediaError, MediaResult};
pub use probe::{probe_media, MediaInfo};
pub use sampler::{sample_frames, sampling_interval, DEFAULT_MAX_FRAMES};
pub use video::{FfmpegVideoSource, SampledFrame, VideoSource};
