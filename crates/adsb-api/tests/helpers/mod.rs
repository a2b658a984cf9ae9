//! Test helpers: build AppState and router for integration tests.
//!
//! The remote archive is a mockito server; storage is the object_store
//! in-memory backend behind `S3Storage`, so no network or credentials are
//! needed. Run with `cargo test -p adsb-api`.
#![allow(dead_code)]

pub mod fixtures;

use adsb_api::constants;
use adsb_api::services::{Preparer, SnapshotPreparer};
use adsb_api::setup::routes;
use adsb_api::state::AppState;
use adsb_core::snapshot::LOCAL_DAY_DIR;
use adsb_core::{AppError, Config, RelayConfig};
use adsb_storage::{S3Storage, Storage};
use async_trait::async_trait;
use axum_test::TestServer;
use mockito::{Mock, ServerGuard};
use object_store::memory::InMemory;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const TEST_BUCKET: &str = "bdi-test-bucket";

/// API path for tests (e.g. `/api/s4/aircraft/download`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Preparer that records the raw files present each time it runs.
pub struct RecordingPreparer {
    raw_day: PathBuf,
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingPreparer {
    fn new(raw_dir: &Path) -> Self {
        Self {
            raw_day: raw_dir.join(LOCAL_DAY_DIR),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Sorted file names seen by each invocation, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Preparer for RecordingPreparer {
    async fn prepare(&self) -> Result<String, AppError> {
        let mut names: Vec<String> = std::fs::read_dir(&self.raw_day)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        self.calls.lock().unwrap().push(names);
        Ok("prepared".to_string())
    }
}

pub enum PreparerKind {
    Recording,
    Snapshot,
}

pub struct TestAppOptions {
    pub with_bucket: bool,
    pub preparer: PreparerKind,
    /// Run with `ENVIRONMENT=production`.
    pub production: bool,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            with_bucket: true,
            preparer: PreparerKind::Recording,
            production: false,
        }
    }
}

/// Test application: server, mocked archive, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub archive: ServerGuard,
    pub storage: Option<Arc<dyn Storage>>,
    pub recorder: Option<Arc<RecordingPreparer>>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        self.storage.as_ref().expect("test app was built without a bucket")
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.temp_dir.path().join("raw")
    }

    pub fn raw_day_dir(&self) -> PathBuf {
        self.raw_dir().join(LOCAL_DAY_DIR)
    }

    pub fn prepared_day_dir(&self) -> PathBuf {
        self.temp_dir.path().join("prepared").join(LOCAL_DAY_DIR)
    }

    /// Store `data` under `key` directly, bypassing the archive.
    pub async fn seed_object(&self, key: &str, data: Vec<u8>) {
        self.storage()
            .put_stream(key, Box::pin(Cursor::new(data)))
            .await
            .expect("Failed to seed object");
    }

    /// Keys currently in storage, sorted.
    pub async fn stored_keys(&self) -> Vec<String> {
        self.storage()
            .list("")
            .await
            .expect("Failed to list storage")
            .into_iter()
            .map(|entry| entry.key)
            .collect()
    }

    /// Mock a snapshot that the archive serves: HEAD 200 and GET with a body.
    pub async fn mock_available(&mut self, token: &str, second: u32) -> (Mock, Mock) {
        let path = fixtures::archive_path(token);
        let head = self
            .archive
            .mock("HEAD", path.as_str())
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let get = self
            .archive
            .mock("GET", path.as_str())
            .with_status(200)
            .with_body(fixtures::gz_snapshot(second))
            .expect(1)
            .create_async()
            .await;
        (head, get)
    }

    /// Mock a HEAD for `token` answering `status`, expected `hits` times.
    pub async fn mock_head(&mut self, token: &str, status: usize, hits: usize) -> Mock {
        self.archive
            .mock("HEAD", fixtures::archive_path(token).as_str())
            .with_status(status)
            .expect(hits)
            .create_async()
            .await
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default()).await
}

/// Setup a test app with a mocked archive, in-memory storage, and isolated
/// local directories.
pub async fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let archive = mockito::Server::new_async().await;
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

    let config = create_test_config(
        &archive.url(),
        temp_dir.path(),
        options.with_bucket,
        options.production,
    );

    let storage: Option<Arc<dyn Storage>> = if options.with_bucket {
        let store = Arc::new(InMemory::new());
        Some(Arc::new(S3Storage::with_store(store, TEST_BUCKET)))
    } else {
        None
    };

    let (preparer, recorder): (Arc<dyn Preparer>, Option<Arc<RecordingPreparer>>) =
        match options.preparer {
            PreparerKind::Recording => {
                let recorder = Arc::new(RecordingPreparer::new(config.raw_dir()));
                (recorder.clone() as Arc<dyn Preparer>, Some(recorder))
            }
            PreparerKind::Snapshot => {
                let preparer = SnapshotPreparer::new(
                    config.raw_dir().clone(),
                    config.prepared_dir().clone(),
                );
                (Arc::new(preparer) as Arc<dyn Preparer>, None)
            }
        };

    let state = Arc::new(
        AppState::new(config.clone(), storage.clone(), preparer).expect("Failed to build state"),
    );

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        archive,
        storage,
        recorder,
        temp_dir,
    }
}

fn create_test_config(
    archive_url: &str,
    root: &Path,
    with_bucket: bool,
    production: bool,
) -> Config {
    let mut vars: HashMap<&str, String> = HashMap::new();
    if production {
        vars.insert("ENVIRONMENT", "production".to_string());
        vars.insert("CORS_ORIGINS", "https://relay.example".to_string());
    } else {
        vars.insert("ENVIRONMENT", "test".to_string());
    }
    vars.insert("BDI_SOURCE_URL", archive_url.to_string());
    vars.insert("BDI_PROBE_TIMEOUT_SECS", "5".to_string());
    vars.insert("BDI_FETCH_TIMEOUT_SECS", "5".to_string());
    vars.insert("BDI_RAW_DIR", root.join("raw").to_string_lossy().into_owned());
    vars.insert(
        "BDI_PREPARED_DIR",
        root.join("prepared").to_string_lossy().into_owned(),
    );
    if with_bucket {
        vars.insert("BDI_S3_BUCKET", TEST_BUCKET.to_string());
    }

    let relay = RelayConfig::from_lookup(|key| vars.get(key).cloned())
        .expect("Failed to build test config");
    Config(Box::new(relay))
}
