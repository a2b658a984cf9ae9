//! ADS-B Relay Storage Library
//!
//! This crate provides the storage abstraction used to park raw snapshots
//! between the download and prepare steps, with implementations for S3 (and
//! S3-compatible providers) and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are plain `/`-separated object names such as
//! `raw/day=20231101/000000Z.json.gz`. Keys must not contain `..` or a
//! leading `/`; validation is centralized in the `keys` module so all
//! backends agree.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use adsb_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectEntry, Storage, StorageError, StorageResult};
