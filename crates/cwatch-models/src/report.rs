//! Analysis report data models.
//!
//! One `AnalysisReport` is produced per invocation. Internally each
//! modality runs as an independent branch whose result is a
//! `BranchOutcome`; the persisted schema collapses a failed branch to a
//! null field, same as a branch that was never requested.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Which leg of an invocation a branch result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Video,
    Audio,
}

impl Modality {
    /// Returns the modality as a string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

/// Why a branch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchFailure {
    /// The media could not be decoded into frames or a waveform.
    Decode(String),
    /// The external inference call failed.
    Inference(String),
}

impl BranchFailure {
    /// Short failure kind label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::Inference(_) => "inference",
        }
    }

    /// Failure detail message.
    pub fn message(&self) -> &str {
        match self {
            Self::Decode(m) | Self::Inference(m) => m,
        }
    }
}

/// Result of one branch, kept inspectable until the report is merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    Succeeded(String),
    Failed(BranchFailure),
}

impl BranchOutcome {
    /// The verdict text if the branch succeeded.
    pub fn verdict(&self) -> Option<&str> {
        match self {
            Self::Succeeded(text) => Some(text),
            Self::Failed(_) => None,
        }
    }

    /// Consume the outcome, yielding the verdict text if any.
    pub fn into_verdict(self) -> Option<String> {
        match self {
            Self::Succeeded(text) => Some(text),
            Self::Failed(_) => None,
        }
    }
}

/// The merged, persisted outcome of one invocation.
///
/// A null modality field means the branch was not requested or failed;
/// the persisted schema does not distinguish the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// RFC 3339 timestamp of the invocation
    pub timestamp: String,
    /// Video branch verdict, if requested and successful
    pub video_analysis: Option<String>,
    /// Audio branch verdict, if requested and successful
    pub audio_analysis: Option<String>,
}

impl AnalysisReport {
    /// Create an empty report stamped with the given invocation time.
    pub fn new(stamp: DateTime<Local>) -> Self {
        Self {
            timestamp: stamp.to_rfc3339(),
            video_analysis: None,
            audio_analysis: None,
        }
    }

    /// Record a branch outcome into the matching modality field.
    pub fn record(&mut self, modality: Modality, outcome: BranchOutcome) {
        let verdict = outcome.into_verdict();
        match modality {
            Modality::Video => self.video_analysis = verdict,
            Modality::Audio => self.audio_analysis = verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_routes_by_modality() {
        let mut report = AnalysisReport::new(Local::now());
        report.record(Modality::Video, BranchOutcome::Succeeded("ok".into()));
        report.record(
            Modality::Audio,
            BranchOutcome::Failed(BranchFailure::Decode("bad bytes".into())),
        );

        assert_eq!(report.video_analysis.as_deref(), Some("ok"));
        assert_eq!(report.audio_analysis, None);
    }

    #[test]
    fn test_verdict_only_on_success() {
        let ok = BranchOutcome::Succeeded("safe".into());
        let err = BranchOutcome::Failed(BranchFailure::Inference("timeout".into()));

        assert_eq!(ok.verdict(), Some("safe"));
        assert_eq!(err.verdict(), None);
        assert_eq!(err, BranchOutcome::Failed(BranchFailure::Inference("timeout".into())));
    }

    #[test]
    fn test_report_json_round_trip_preserves_unicode() {
        let report = AnalysisReport {
            timestamp: "2025-01-15T10:30:00+00:00".to_string(),
            video_analysis: Some("ঝুঁকি শনাক্ত হয়নি — দৃশ্য নিরাপদ".to_string()),
            audio_analysis: None,
        };

        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, report);
        // Non-ASCII text must survive serialization verbatim, not as \u escapes
        assert!(json.contains("ঝুঁকি"));
    }

    #[test]
    fn test_failure_kind_labels() {
        assert_eq!(BranchFailure::Decode("x".into()).kind(), "decode");
        assert_eq!(BranchFailure::Inference("x".into()).kind(), "inference");
        assert_eq!(BranchFailure::Inference("quota".into()).message(), "quota");
    }
}
