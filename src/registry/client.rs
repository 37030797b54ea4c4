//! HTTP client shared foundation
//!
//! This module provides:
//! - The `Fetcher` seam used by the download client
//! - A reqwest-backed implementation with configurable timeout and User-Agent
//!
//! Requests are not retried: a failed download becomes an error record for
//! a later run to pick up.

use crate::error::DownloadError;
use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("license-inventory/", env!("CARGO_PKG_VERSION"));

/// A fetched HTTP response, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw `Retry-After` header value, if present
    pub retry_after: Option<String>,
    /// Response body as text
    pub body: String,
}

impl FetchResponse {
    /// Creates a response without `Retry-After`
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    /// Sets the `Retry-After` value (builder pattern)
    pub fn with_retry_after(mut self, value: impl Into<String>) -> Self {
        self.retry_after = Some(value.into());
        self
    }
}

/// Performs one GET request
///
/// Any HTTP status is a successful fetch; `Err` means no response was
/// received at all.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a URL
    async fn fetch(&self, url: &str) -> Result<FetchResponse, DownloadError>;
}

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| DownloadError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, DownloadError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, format!("failed to read body: {}", e))
            }
        })?;

        Ok(FetchResponse {
            status,
            retry_after,
            body,
        })
    }
}
