//! Download Manager for GenBrowser.
//!
//! Turns each engine download request into exactly one decision: the user
//! picks a destination and the download is accepted, or the prompt is
//! cancelled and the request is left unaccepted. Transfer itself belongs to
//! the engine; accepted items are only listed in memory.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::info;
use uuid::Uuid;

use crate::chrome::Chrome;
use crate::engine::DownloadRequest;
use crate::types::download::{DownloadDecision, DownloadItem, DownloadStatus, PendingDownload};

pub const DOWNLOAD_STARTED_STATUS: Duration = Duration::from_millis(5000);
pub const DOWNLOAD_CANCELED_STATUS: Duration = Duration::from_millis(3000);

/// Trait defining download management operations.
pub trait DownloadManagerTrait {
    fn handle_request<R, C>(&mut self, request: &mut R, chrome: &mut C) -> DownloadDecision
    where
        R: DownloadRequest + ?Sized,
        C: Chrome + ?Sized;
    fn mark_finished(&mut self, url: &str, success: bool);
    fn pending(&self) -> Option<&PendingDownload>;
    fn list_downloads(&self) -> Vec<&DownloadItem>;
    fn get_download(&self, id: &str) -> Option<&DownloadItem>;
}

/// In-memory download manager. The list lives for the browser session and
/// keeps finished items so their final status stays visible.
#[derive(Debug, Default)]
pub struct DownloadManager {
    pending: Option<PendingDownload>,
    downloads: Vec<DownloadItem>,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_ts() -> i64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
    }
}

impl DownloadManagerTrait for DownloadManager {
    fn handle_request<R, C>(&mut self, request: &mut R, chrome: &mut C) -> DownloadDecision
    where
        R: DownloadRequest + ?Sized,
        C: Chrome + ?Sized,
    {
        let suggested = request.suggested_file_name();
        self.pending = Some(PendingDownload {
            id: Uuid::new_v4().to_string(),
            url: request.url(),
            suggested_name: suggested.clone(),
        });

        let chosen = chrome
            .prompt_save_path("Save File", &suggested)
            .filter(|p| !p.as_os_str().is_empty());
        let pending = self.pending.take();

        let Some(path) = chosen else {
            info!(file = %suggested, "download canceled");
            chrome.show_status("Download canceled", DOWNLOAD_CANCELED_STATUS);
            return DownloadDecision::Cancelled;
        };

        request.set_path(&path);
        request.accept();

        let (id, url) = pending
            .map(|p| (p.id, p.url))
            .unwrap_or_else(|| (Uuid::new_v4().to_string(), request.url()));
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| suggested.clone());
        info!(%url, path = %path.display(), "download accepted");
        self.downloads.insert(
            0,
            DownloadItem {
                id,
                url,
                filename,
                filepath: path.clone(),
                status: DownloadStatus::InProgress,
                started_at: Self::now_ts(),
            },
        );

        chrome.show_status(&format!("Downloading {}...", suggested), DOWNLOAD_STARTED_STATUS);
        DownloadDecision::Accepted(path)
    }

    /// Marks the newest in-progress download for `url` as finished.
    fn mark_finished(&mut self, url: &str, success: bool) {
        if let Some(item) = self
            .downloads
            .iter_mut()
            .find(|d| d.url == url && d.status == DownloadStatus::InProgress)
        {
            item.status = if success {
                DownloadStatus::Completed
            } else {
                DownloadStatus::Failed
            };
            info!(%url, success, "download finished");
        }
    }

    fn pending(&self) -> Option<&PendingDownload> {
        self.pending.as_ref()
    }

    fn list_downloads(&self) -> Vec<&DownloadItem> {
        self.downloads.iter().collect()
    }

    fn get_download(&self, id: &str) -> Option<&DownloadItem> {
        self.downloads.iter().find(|d| d.id == id)
    }
}
