use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::ReviewError;
use crate::models::SubmissionRecord;
use crate::review::SubmissionRecorder;

/// Appends one JSON line per recorded submission.
pub struct JsonlRecorder {
    path: PathBuf,
}

impl JsonlRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SubmissionRecorder for JsonlRecorder {
    async fn record(&self, repo_url: &str, review: &str) -> Result<(), ReviewError> {
        let record = SubmissionRecord {
            repo_url: repo_url.to_string(),
            review: review.to_string(),
            created_at: Utc::now(),
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| ReviewError::storage(format!("serialize submission: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;

        tracing::debug!(path = %self.path.display(), repo_url, "submission recorded");
        Ok(())
    }
}
