//! Mirrors the stored snapshots of the day into the local raw directory and
//! hands them to the preparation step.

use super::prepare::Preparer;
use super::reset_dir;
use adsb_core::snapshot::{LOCAL_DAY_DIR, STORAGE_PREFIX};
use adsb_core::AppError;
use adsb_storage::{Storage, StorageError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
pub struct SnapshotLocalizer {
    storage: Option<Arc<dyn Storage>>,
    raw_dir: PathBuf,
    preparer: Arc<dyn Preparer>,
}

impl SnapshotLocalizer {
    pub fn new(
        storage: Option<Arc<dyn Storage>>,
        raw_dir: impl Into<PathBuf>,
        preparer: Arc<dyn Preparer>,
    ) -> Self {
        Self {
            storage,
            raw_dir: raw_dir.into(),
            preparer,
        }
    }

    /// Local directory holding the raw snapshots of the day.
    pub fn local_day_dir(&self) -> PathBuf {
        self.raw_dir.join(LOCAL_DAY_DIR)
    }

    /// Replace the local day directory with the current storage listing, then
    /// run the preparer and return its status unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn localize(&self) -> Result<String, AppError> {
        let storage = self.storage.as_ref().ok_or_else(AppError::missing_bucket)?;

        let local_dir = self.local_day_dir();
        reset_dir(&local_dir).await?;

        let entries = storage.list(STORAGE_PREFIX).await?;
        let mut downloaded = 0usize;

        for entry in &entries {
            // Directory markers created by some S3 tools.
            if entry.key.ends_with('/') {
                continue;
            }
            let Some(relative) = entry.key.strip_prefix(STORAGE_PREFIX) else {
                continue;
            };

            let dest = local_destination(&local_dir, relative)?;
            if let Some(parent) = dest.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            storage.download_to_path(&entry.key, &dest).await?;
            downloaded += 1;
        }

        tracing::info!(
            downloaded,
            bucket = %storage.bucket(),
            dir = %local_dir.display(),
            "Snapshots localized"
        );

        self.preparer.prepare().await
    }
}

/// Local path for an object name relative to the storage prefix. Names that
/// would land outside `local_dir` are rejected.
fn local_destination(local_dir: &Path, relative: &str) -> Result<PathBuf, AppError> {
    if relative.is_empty()
        || relative.starts_with('/')
        || relative.contains('\\')
        || relative.split('/').any(|part| part == ".." || part.is_empty())
    {
        return Err(StorageError::InvalidKey(format!("{}{}", STORAGE_PREFIX, relative)).into());
    }

    Ok(local_dir.join(relative))
}
