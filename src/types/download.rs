use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Status of an accepted download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DownloadStatus {
    InProgress,
    Completed,
    Failed,
}

/// An accepted download, kept in memory for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadItem {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub filepath: PathBuf,
    pub status: DownloadStatus,
    pub started_at: i64,
}

/// A download request waiting on the save prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDownload {
    pub id: String,
    pub url: String,
    pub suggested_name: String,
}

/// Outcome of one download-request event.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadDecision {
    Accepted(PathBuf),
    Cancelled,
}
