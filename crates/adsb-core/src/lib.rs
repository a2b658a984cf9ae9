//! ADS-B Relay Core Library
//!
//! This crate provides configuration, error types, and the snapshot-day
//! naming scheme shared by the storage and API crates.

pub mod config;
pub mod error;
pub mod snapshot;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, RelayConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
