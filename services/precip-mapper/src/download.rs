//! Archive download with retry and exponential backoff.
//!
//! The archive is small (a few MB) and held in memory. Network errors,
//! 5xx and 429 responses are retried; other statuses fail at once.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::{header, Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::SourceConfig;

/// Retry and timeout settings for [`ArchiveFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled each time
    pub initial_retry_delay: Duration,
    pub max_retry_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_retry_delay: Duration::from_secs(2),
            max_retry_delay: Duration::from_secs(60),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl From<&SourceConfig> for FetchConfig {
    fn from(source: &SourceConfig) -> Self {
        Self {
            max_retries: source.max_retries,
            initial_retry_delay: Duration::from_secs(source.initial_retry_delay_secs),
            max_retry_delay: Duration::from_secs(source.max_retry_delay_secs),
            request_timeout: source.timeout(),
        }
    }
}

impl FetchConfig {
    /// Delay before retry number `retry` (1-based).
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_retry_delay
            .saturating_mul(factor)
            .min(self.max_retry_delay)
    }
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(StatusCode),

    #[error("Truncated body: expected {expected} bytes, got {actual}")]
    Truncated { expected: u64, actual: u64 },
}

impl FetchError {
    fn is_transient(&self) -> bool {
        match self {
            FetchError::Request(_) | FetchError::Truncated { .. } => true,
            FetchError::Status(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
        }
    }
}

/// Downloads precipitation archives over HTTP.
pub struct ArchiveFetcher {
    client: Client,
    config: FetchConfig,
}

impl ArchiveFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Fetch `url` into memory, retrying transient failures.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        let mut retry = 0;

        loop {
            match self.fetch_once(url).await {
                Ok(body) => {
                    info!(bytes = body.len(), retries = retry, "Archive downloaded");
                    return Ok(body);
                }
                Err(e) if e.is_transient() && retry < self.config.max_retries => {
                    retry += 1;
                    let delay = self.config.backoff_delay(retry);
                    warn!(
                        error = %e,
                        retry,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Download failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(anyhow!("Download failed after {} retries: {}", retry, e));
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> std::result::Result<Bytes, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let expected: Option<u64> = response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());

        let mut body = BytesMut::with_capacity(expected.unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk?);
        }

        if let Some(expected) = expected {
            let actual = body.len() as u64;
            if actual != expected {
                return Err(FetchError::Truncated { expected, actual });
            }
        }

        debug!(bytes = body.len(), "Response body read");
        Ok(body.freeze())
    }
}
