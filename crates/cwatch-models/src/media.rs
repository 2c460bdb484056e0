//! Media inputs and container-hint validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::Modality;

/// Video containers accepted by the pipeline.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

/// Audio containers accepted by the pipeline.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "flac", "ogg"];

/// Errors constructing a media input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MediaInputError {
    #[error("unsupported {modality} container: .{extension}")]
    UnsupportedContainer {
        modality: &'static str,
        extension: String,
    },

    #[error("empty media buffer")]
    Empty,
}

/// One raw media buffer handed to the orchestrator.
///
/// Transient: owned by a single `analyze` call and dropped afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInput {
    /// Raw container bytes
    pub bytes: Vec<u8>,
    /// Container hint (lowercased file extension, no dot)
    pub extension: String,
    /// Declared modality
    pub modality: Modality,
}

impl MediaInput {
    /// Create a video input, validating the container hint.
    pub fn video(bytes: Vec<u8>, extension: &str) -> Result<Self, MediaInputError> {
        Self::new(bytes, extension, Modality::Video, VIDEO_EXTENSIONS)
    }

    /// Create an audio input, validating the container hint.
    pub fn audio(bytes: Vec<u8>, extension: &str) -> Result<Self, MediaInputError> {
        Self::new(bytes, extension, Modality::Audio, AUDIO_EXTENSIONS)
    }

    fn new(
        bytes: Vec<u8>,
        extension: &str,
        modality: Modality,
        allowed: &[&str],
    ) -> Result<Self, MediaInputError> {
        if bytes.is_empty() {
            return Err(MediaInputError::Empty);
        }

        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        if !allowed.contains(&extension.as_str()) {
            return Err(MediaInputError::UnsupportedContainer {
                modality: modality.as_str(),
                extension,
            });
        }

        Ok(Self {
            bytes,
            extension,
            modality,
        })
    }
}
