//! Copies snapshots from the remote archive into object storage.

use super::archive::ArchiveClient;
use adsb_core::snapshot::{filename_tokens, storage_key};
use adsb_core::AppError;
use adsb_storage::Storage;
use std::sync::Arc;

/// Default number of files uploaded per request.
pub const DEFAULT_FILE_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct SnapshotDownloader {
    archive: ArchiveClient,
    storage: Option<Arc<dyn Storage>>,
}

impl SnapshotDownloader {
    pub fn new(archive: ArchiveClient, storage: Option<Arc<dyn Storage>>) -> Self {
        Self { archive, storage }
    }

    /// Upload up to `file_limit` snapshots of the day, earliest first, and
    /// return how many were uploaded.
    ///
    /// Snapshots whose probe fails are skipped and do not count toward the
    /// limit. A failure after a successful probe aborts the whole run.
    #[tracing::instrument(skip(self))]
    pub async fn download(&self, file_limit: i64) -> Result<u64, AppError> {
        if file_limit <= 0 {
            return Ok(0);
        }

        let storage = self.storage.as_ref().ok_or_else(AppError::missing_bucket)?;
        let limit = file_limit as u64;
        let mut uploaded: u64 = 0;
        let mut skipped: u64 = 0;

        for token in filename_tokens() {
            if uploaded >= limit {
                break;
            }

            if !self.archive.exists(&token).await {
                skipped += 1;
                continue;
            }

            let key = storage_key(&token);
            let body = self.archive.fetch(&token).await?;
            let size = storage.put_stream(&key, body).await?;

            tracing::debug!(token = %token, key = %key, size_bytes = size, "Snapshot uploaded");
            uploaded += 1;
        }

        tracing::info!(
            uploaded,
            skipped,
            bucket = %storage.bucket(),
            "Snapshot download finished"
        );

        Ok(uploaded)
    }
}

/// Status line returned by the download endpoint.
pub fn upload_status(uploaded: u64) -> String {
    format!("OK uploaded={}", uploaded)
}
