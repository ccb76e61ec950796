use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File-detail object from the contents API, kept field for field. One
/// record per `type=file` entry reached during the walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub size: u64,
    pub url: String,
    pub html_url: Option<String>,
    pub download_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Option<String>,
    pub encoding: Option<String>,
}

/// Unit persisted by the submission recorder after a successful review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub repo_url: String,
    pub review: String,
    pub created_at: DateTime<Utc>,
}
