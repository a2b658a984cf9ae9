//! Download, localize, and prepare services behind the HTTP handlers.

pub mod archive;
pub mod download;
pub mod localize;
pub mod prepare;

pub use archive::ArchiveClient;
pub use download::{upload_status, SnapshotDownloader, DEFAULT_FILE_LIMIT};
pub use localize::SnapshotLocalizer;
pub use prepare::{Preparer, SnapshotPreparer};

use std::io;
use std::path::Path;

/// Delete `path` with everything below it, then recreate it empty.
pub(crate) async fn reset_dir(path: &Path) -> io::Result<()> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    tokio::fs::create_dir_all(path).await
}
