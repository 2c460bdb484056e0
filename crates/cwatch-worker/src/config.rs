//! Worker configuration.

use std::path::PathBuf;

use cwatch_media::DEFAULT_MAX_FRAMES;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Directory reports are written to, created lazily on first save
    pub output_dir: PathBuf,
    /// Cap on frames sampled per video
    pub max_frames: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("analysis_results"),
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            output_dir: std::env::var("CWATCH_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("analysis_results")),
            max_frames: std::env::var("CWATCH_MAX_FRAMES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_FRAMES),
        }
    }
}
