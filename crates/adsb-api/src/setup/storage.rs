//! Storage setup and initialization

use adsb_core::Config;
use adsb_storage::{create_storage, Storage};
use anyhow::Result;
use std::sync::Arc;

/// Build the configured storage backend, or `None` when no bucket is set.
pub async fn setup_storage(config: &Config) -> Result<Option<Arc<dyn Storage>>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).await?;

    match &storage {
        Some(storage) => tracing::info!(
            backend = ?storage.backend_type(),
            bucket = %storage.bucket(),
            "Storage abstraction initialized successfully"
        ),
        None => tracing::warn!(
            "BDI_S3_BUCKET is not set; download and prepare requests will fail until it is configured"
        ),
    }

    Ok(storage)
}
