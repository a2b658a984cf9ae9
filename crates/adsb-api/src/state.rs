//! Application state shared by all handlers.

use crate::services::{ArchiveClient, Preparer, SnapshotDownloader, SnapshotLocalizer};
use adsb_core::{AppError, Config};
use adsb_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no bucket is configured; handlers report it per request.
    pub storage: Option<Arc<dyn Storage>>,
    pub downloader: SnapshotDownloader,
    pub localizer: SnapshotLocalizer,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Option<Arc<dyn Storage>>,
        preparer: Arc<dyn Preparer>,
    ) -> Result<Self, AppError> {
        let archive = ArchiveClient::new(
            config.source_url(),
            config.probe_timeout(),
            config.fetch_timeout(),
        )?;

        let downloader = SnapshotDownloader::new(archive, storage.clone());
        let localizer = SnapshotLocalizer::new(storage.clone(), config.raw_dir().clone(), preparer);

        Ok(Self {
            config,
            storage,
            downloader,
            localizer,
        })
    }
}
