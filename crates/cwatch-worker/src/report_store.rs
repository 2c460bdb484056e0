//! Durable JSON report persistence.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use cwatch_models::AnalysisReport;

use crate::error::{WorkerError, WorkerResult};

/// Appends one JSON report per invocation under a fixed output directory.
///
/// The directory is injected configuration and created lazily on first
/// save. Filenames derive from the same clock read as the report's own
/// timestamp field, so the two always agree.
#[derive(Debug, Clone)]
pub struct ReportStore {
    output_dir: PathBuf,
}

impl ReportStore {
    /// Create a store rooted at the given directory.
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Serialize and write a report, returning its location.
    ///
    /// Non-ASCII verdict text round-trips byte-for-byte; serde_json never
    /// escapes it.
    pub async fn save(
        &self,
        report: &AnalysisReport,
        stamp: DateTime<Local>,
    ) -> WorkerResult<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                WorkerError::persistence(format!(
                    "cannot create {}: {}",
                    self.output_dir.display(),
                    e
                ))
            })?;

        let filename = format!("analysis_{}.json", stamp.format("%Y%m%d_%H%M%S"));
        let path = self.output_dir.join(filename);

        let json = serde_json::to_string_pretty(report)
            .map_err(|e| WorkerError::persistence(format!("serialization failed: {}", e)))?;

        tokio::fs::write(&path, json).await.map_err(|e| {
            WorkerError::persistence(format!("cannot write {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), "Report persisted");
        Ok(path)
    }
}
