//! HTTP client for the remote snapshot archive.

use adsb_core::snapshot::remote_url;
use adsb_core::AppError;
use futures::StreamExt;
use reqwest::StatusCode;
use std::pin::Pin;
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

/// Reads snapshot files from `<base_url>/<date path>/<token>`.
#[derive(Clone)]
pub struct ArchiveClient {
    client: reqwest::Client,
    base_url: String,
    probe_timeout: Duration,
    fetch_timeout: Duration,
}

impl ArchiveClient {
    pub fn new(
        base_url: impl Into<String>,
        probe_timeout: Duration,
        fetch_timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            probe_timeout,
            fetch_timeout,
        })
    }

    /// HEAD the snapshot. Only a 200 counts as present; any other status or a
    /// transport failure means "missing" and is never an error.
    pub async fn exists(&self, token: &str) -> bool {
        let url = remote_url(&self.base_url, token);

        match self
            .client
            .head(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                tracing::debug!(url = %url, status = %response.status(), "Snapshot missing from archive");
                false
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Snapshot probe failed");
                false
            }
        }
    }

    /// GET the snapshot body as a reader. The body is pulled from the network as
    /// the reader is consumed; the timeout covers the whole transfer.
    pub async fn fetch(
        &self,
        token: &str,
    ) -> Result<Pin<Box<dyn AsyncRead + Send + Unpin>>, AppError> {
        let url = remote_url(&self.base_url, token);

        let response = self
            .client
            .get(&url)
            .timeout(self.fetch_timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::error!(error = %e, url = %url, "Failed to fetch snapshot");
                AppError::Source(format!("GET {} failed: {}", url, e))
            })?;

        let body = Box::pin(response.bytes_stream().map(|chunk| chunk.map_err(std::io::Error::other)));

        Ok(Box::pin(StreamReader::new(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn client(base_url: String) -> ArchiveClient {
        ArchiveClient::new(base_url, Duration::from_millis(200), Duration::from_millis(200)).unwrap()
    }

    #[tokio::test]
    async fn test_refused_connection_counts_as_missing() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let archive = client(format!("http://{}", addr));
        assert!(!archive.exists("000000Z.json.gz").await);
    }

    #[tokio::test]
    async fn test_head_timeout_counts_as_missing() {
        // Accepts connections and never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let archive = client(format!("http://{}", addr));
        assert!(!archive.exists("000000Z.json.gz").await);

        server.abort();
    }

    #[tokio::test]
    async fn test_head_status_decides_presence() {
        let mut server = mockito::Server::new_async().await;
        let present = server
            .mock("HEAD", "/2023/11/01/000000Z.json.gz")
            .with_status(200)
            .create_async()
            .await;
        let empty = server
            .mock("HEAD", "/2023/11/01/000005Z.json.gz")
            .with_status(204)
            .create_async()
            .await;

        let archive = client(server.url());
        assert!(archive.exists("000000Z.json.gz").await);
        assert!(!archive.exists("000005Z.json.gz").await);
        assert!(!archive.exists("000010Z.json.gz").await);

        present.assert_async().await;
        empty.assert_async().await;
    }
}
