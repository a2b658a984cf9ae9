//! Configuration module
//!
//! Process-wide settings are read once at startup and handed to each service
//! explicitly, so tests can substitute their own values.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8080;
const PROBE_TIMEOUT_SECS: u64 = 30;
const FETCH_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SOURCE_URL: &str = "https://samples.adsbexchange.com/readsb-hist";
const DEFAULT_REGION: &str = "us-east-1";

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Relay configuration: remote archive, object storage, and local directories
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub base: BaseConfig,
    // Remote archive
    pub source_url: String,
    pub probe_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub local_storage_path: String,
    // Local directories
    pub raw_dir: PathBuf,
    pub prepared_dir: PathBuf,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<RelayConfig>);

impl Config {
    fn as_relay(&self) -> &RelayConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_relay().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = RelayConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_relay().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_relay().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_relay().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_relay().base.environment
    }

    pub fn source_url(&self) -> &str {
        &self.as_relay().source_url
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.as_relay().probe_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.as_relay().fetch_timeout_secs)
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_relay().storage_backend
    }

    /// Bucket name; `None` when unset or blank.
    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_relay()
            .s3_bucket
            .as_deref()
            .filter(|b| !b.trim().is_empty())
    }

    pub fn s3_region(&self) -> &str {
        &self.as_relay().s3_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_relay().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> &str {
        &self.as_relay().local_storage_path
    }

    pub fn raw_dir(&self) -> &PathBuf {
        &self.as_relay().raw_dir
    }

    pub fn prepared_dir(&self) -> &PathBuf {
        &self.as_relay().prepared_dir
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            server_port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(SERVER_PORT),
            cors_origins,
            environment,
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::S3,
        };

        Ok(RelayConfig {
            base,
            source_url: lookup("BDI_SOURCE_URL").unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            probe_timeout_secs: lookup("BDI_PROBE_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(PROBE_TIMEOUT_SECS),
            fetch_timeout_secs: lookup("BDI_FETCH_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(FETCH_TIMEOUT_SECS),
            storage_backend,
            s3_bucket: lookup("BDI_S3_BUCKET").filter(|b| !b.trim().is_empty()),
            s3_region: lookup("S3_REGION")
                .or_else(|| lookup("AWS_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            s3_endpoint: lookup("S3_ENDPOINT"),
            local_storage_path: lookup("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| "data/object-store".to_string()),
            raw_dir: PathBuf::from(lookup("BDI_RAW_DIR").unwrap_or_else(|| "data/raw".to_string())),
            prepared_dir: PathBuf::from(
                lookup("BDI_PREPARED_DIR").unwrap_or_else(|| "data/prepared".to_string()),
            ),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let source = self.source_url.trim();
        if source.is_empty() {
            return Err(anyhow::anyhow!("BDI_SOURCE_URL must not be empty"));
        }

        if !source.starts_with("http://") && !source.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "BDI_SOURCE_URL must be an http:// or https:// URL, got {}",
                source
            ));
        }

        if self.probe_timeout_secs == 0 || self.fetch_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "BDI_PROBE_TIMEOUT_SECS and BDI_FETCH_TIMEOUT_SECS must be greater than zero"
            ));
        }

        Ok(())
    }
}
