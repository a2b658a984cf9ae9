//! Preparation step run after the raw snapshots are on local disk.
//!
//! The localizer only knows the [`Preparer`] contract: no arguments, read the
//! local raw directory, return a status string. [`SnapshotPreparer`] is the
//! implementation wired into the server.

use super::reset_dir;
use adsb_core::snapshot::LOCAL_DAY_DIR;
use adsb_core::AppError;
use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[async_trait]
pub trait Preparer: Send + Sync {
    async fn prepare(&self) -> Result<String, AppError>;
}

/// Decompresses every raw `*.json.gz` snapshot of the day into
/// `<prepared_dir>/day=<DAY>/<HHMMSSZ>.json`, checking each parses as JSON.
#[derive(Clone, Debug)]
pub struct SnapshotPreparer {
    raw_dir: PathBuf,
    prepared_dir: PathBuf,
}

impl SnapshotPreparer {
    pub fn new(raw_dir: impl Into<PathBuf>, prepared_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            prepared_dir: prepared_dir.into(),
        }
    }
}

#[async_trait]
impl Preparer for SnapshotPreparer {
    async fn prepare(&self) -> Result<String, AppError> {
        let raw_day = self.raw_dir.join(LOCAL_DAY_DIR);
        let prepared_day = self.prepared_dir.join(LOCAL_DAY_DIR);
        reset_dir(&prepared_day).await?;

        let prepared = tokio::task::spawn_blocking(move || prepare_day(&raw_day, &prepared_day))
            .await
            .map_err(|e| AppError::Internal(format!("Preparation task failed: {}", e)))??;

        tracing::info!(files = prepared, "Snapshots prepared");
        Ok("OK".to_string())
    }
}

fn prepare_day(raw_day: &Path, prepared_day: &Path) -> Result<usize, AppError> {
    if !raw_day.is_dir() {
        return Ok(0);
    }

    let mut snapshots: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(raw_day)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        let path = entry.path();
        let is_snapshot = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".json.gz"));
        if is_snapshot {
            snapshots.push(path);
        }
    }
    snapshots.sort();

    for path in &snapshots {
        let json = decompress(path)?;
        serde_json::from_str::<serde_json::Value>(&json).map_err(|e| {
            AppError::Preparation(format!("{} is not valid JSON: {}", path.display(), e))
        })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(".gz"))
            .ok_or_else(|| AppError::Preparation(format!("Bad file name {}", path.display())))?;
        fs::write(prepared_day.join(name), json)?;
    }

    Ok(snapshots.len())
}

fn decompress(path: &Path) -> Result<String, AppError> {
    let file = fs::File::open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut json = String::new();
    decoder.read_to_string(&mut json).map_err(|e| {
        AppError::Preparation(format!("Failed to decompress {}: {}", path.display(), e))
    })?;
    Ok(json)
}
