//! Analysis orchestration.
//!
//! Drives the independent video and audio branches of one invocation:
//! materialize bytes, decode, sample or extract, prompt, infer. Every
//! failure inside a branch is caught at the branch boundary and collapses
//! to a null report field; only persistence failures propagate.

use std::sync::Arc;

use chrono::Local;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use cwatch_media::{extract_features, sample_frames, FfmpegVideoSource};
use cwatch_ml_client::{Inference, Part};
use cwatch_models::{AnalysisReport, BranchFailure, BranchOutcome, MediaInput, Modality};

use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::prompt;
use crate::report_store::ReportStore;

/// Coordinates one analysis invocation end to end.
pub struct Analyzer {
    config: WorkerConfig,
    inference: Arc<dyn Inference>,
    store: ReportStore,
}

impl Analyzer {
    /// Create a new analyzer.
    pub fn new(config: WorkerConfig, inference: Arc<dyn Inference>) -> Self {
        let store = ReportStore::new(&config.output_dir);
        Self {
            config,
            inference,
            store,
        }
    }

    /// Analyze up to one video and one audio input, persist the merged
    /// report, and return it.
    ///
    /// Never errors on branch failures; with both inputs absent the
    /// inference service is not contacted and both fields stay null.
    pub async fn analyze(
        &self,
        video: Option<MediaInput>,
        audio: Option<MediaInput>,
    ) -> WorkerResult<AnalysisReport> {
        // One clock read feeds both the report field and the filename.
        let stamp = Local::now();
        let mut report = AnalysisReport::new(stamp);

        if let Some(input) = video {
            let outcome = self.run_branch(Modality::Video, &input).await;
            report.record(Modality::Video, outcome);
        }

        if let Some(input) = audio {
            let outcome = self.run_branch(Modality::Audio, &input).await;
            report.record(Modality::Audio, outcome);
        }

        let path = self.store.save(&report, stamp).await?;
        info!(
            path = %path.display(),
            video = report.video_analysis.is_some(),
            audio = report.audio_analysis.is_some(),
            "Analysis complete"
        );

        Ok(report)
    }

    /// Run one branch, absorbing every failure at this boundary.
    async fn run_branch(&self, modality: Modality, input: &MediaInput) -> BranchOutcome {
        let result = match modality {
            Modality::Video => self.video_branch(input).await,
            Modality::Audio => self.audio_branch(input).await,
        };

        match result {
            Ok(text) => {
                info!(modality = modality.as_str(), "Branch succeeded");
                BranchOutcome::Succeeded(text)
            }
            Err(failure) => {
                warn!(
                    modality = modality.as_str(),
                    kind = failure.kind(),
                    error = failure.message(),
                    "Branch failed"
                );
                BranchOutcome::Failed(failure)
            }
        }
    }

    /// Video branch: decode, sample frames, one multimodal inference call.
    async fn video_branch(&self, input: &MediaInput) -> Result<String, BranchFailure> {
        let file = materialize(input).await?;

        let source = FfmpegVideoSource::open(file.path())
            .await
            .map_err(|e| BranchFailure::Decode(e.to_string()))?;

        let frames = sample_frames(&source, self.config.max_frames)
            .await
            .map_err(|e| BranchFailure::Decode(e.to_string()))?;

        if frames.is_empty() {
            return Err(BranchFailure::Decode("no frames decoded".to_string()));
        }

        let parts =
            prompt::video_request(&frames).map_err(|e| BranchFailure::Decode(e.to_string()))?;

        self.inference
            .generate(parts)
            .await
            .map_err(|e| BranchFailure::Inference(e.to_string()))
    }

    /// Audio branch: decode, extract the feature vector, one text call.
    async fn audio_branch(&self, input: &MediaInput) -> Result<String, BranchFailure> {
        let file = materialize(input).await?;

        let features = extract_features(file.path())
            .await
            .map_err(|e| BranchFailure::Decode(e.to_string()))?;

        let parts = vec![Part::text(prompt::audio_request(&features))];

        self.inference
            .generate(parts)
            .await
            .map_err(|e| BranchFailure::Inference(e.to_string()))
    }
}

/// Write the buffered media to a suffixed temp file so FFmpeg can sniff
/// the container. Dropping the handle removes the file on every path.
async fn materialize(input: &MediaInput) -> Result<NamedTempFile, BranchFailure> {
    let file = tempfile::Builder::new()
        .prefix("cwatch_")
        .suffix(&format!(".{}", input.extension))
        .tempfile()
        .map_err(|e| BranchFailure::Decode(format!("temp file failed: {}", e)))?;

    tokio::fs::write(file.path(), &input.bytes)
        .await
        .map_err(|e| BranchFailure::Decode(format!("buffer write failed: {}", e)))?;

    Ok(file)
}
