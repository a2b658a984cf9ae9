//! Application setup and initialization
//!
//! Kept out of main.rs so integration tests can build the same router.

pub mod routes;
pub mod server;
pub mod storage;

use crate::services::{Preparer, SnapshotPreparer};
use crate::state::AppState;
use adsb_core::Config;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        source = %config.source_url(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;

    let preparer: Arc<dyn Preparer> = Arc::new(SnapshotPreparer::new(
        config.raw_dir().clone(),
        config.prepared_dir().clone(),
    ));

    let state = Arc::new(AppState::new(config.clone(), storage, preparer)?);

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
