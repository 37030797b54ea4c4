//! Download client
//!
//! Fetches one endpoint document for a dependency, classifies the response
//! and saves successful bodies under `<output>/<platform>/<filename>`.
//!
//! Classification:
//! - status < 300: saved
//! - status 403, or no response at all: forbidden, the caller stops
//!   querying the platform
//! - any other status: failed, the dependency goes to the error file
//!
//! npm requests are spaced by a fixed delay minus the request duration.

use super::client::Fetcher;
use super::endpoint::{Endpoint, Placeholders};
use super::retry_after::{parse_retry_after, RetryAfter};
use crate::domain::{ErrorCode, Platform};
use crate::error::IoError;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default spacing between npm requests
pub const DEFAULT_NPM_DELAY: Duration = Duration::from_millis(2500);

const FORBIDDEN: u16 = 403;

/// How a download ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Body saved to disk
    Saved { path: PathBuf, body: String },
    /// Non-success status other than 403
    Failed,
    /// 403, or the request got no response
    Forbidden,
}

/// Result of one download attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    /// Requested URL
    pub url: String,
    /// HTTP status, absent when no response was received
    pub http_status: Option<u16>,
    /// Parsed `Retry-After` of an error response
    pub retry_after: Option<RetryAfter>,
    /// Classification
    pub outcome: DownloadOutcome,
}

impl DownloadResult {
    /// Path of the saved document
    pub fn local_path(&self) -> Option<&Path> {
        match &self.outcome {
            DownloadOutcome::Saved { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Body of the saved document
    pub fn body(&self) -> Option<&str> {
        match &self.outcome {
            DownloadOutcome::Saved { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true if the platform must not be queried further this run
    pub fn is_hard_error(&self) -> bool {
        self.outcome == DownloadOutcome::Forbidden
    }

    /// Error code to record, `None` for a saved document
    pub fn error_code(&self) -> Option<ErrorCode> {
        match (&self.outcome, self.http_status) {
            (DownloadOutcome::Saved { .. }, _) => None,
            (_, Some(status)) => Some(ErrorCode::Status(status)),
            (_, None) => Some(ErrorCode::Transport),
        }
    }
}

/// Fetches endpoint documents and stores them per platform
#[derive(Clone)]
pub struct Downloader {
    fetcher: Arc<dyn Fetcher>,
    output_dir: PathBuf,
    npm_delay: Duration,
}

impl Downloader {
    /// Creates a downloader writing under `output_dir`
    pub fn new(fetcher: Arc<dyn Fetcher>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.into(),
            npm_delay: DEFAULT_NPM_DELAY,
        }
    }

    /// Set the spacing between npm requests
    pub fn with_npm_delay(mut self, delay: Duration) -> Self {
        self.npm_delay = delay;
        self
    }

    /// Directory receiving the documents of a platform
    pub fn platform_dir(&self, platform: Platform) -> PathBuf {
        self.output_dir.join(platform.key())
    }

    /// Downloads the endpoint document for the given placeholders
    ///
    /// # Errors
    ///
    /// Only a failure to save a received document is an error; network
    /// failures are reported in the result.
    pub async fn download(
        &self,
        platform: Platform,
        endpoint: Endpoint,
        placeholders: &Placeholders<'_>,
    ) -> Result<DownloadResult, IoError> {
        let url = endpoint.url(placeholders);
        let filename = endpoint.filename(placeholders);
        debug!("Downloading {} from {}: {}", placeholders.component, endpoint, url);
        self.download_url(platform, &url, &filename).await
    }

    /// Downloads a URL and saves a successful body as `filename`
    pub async fn download_url(
        &self,
        platform: Platform,
        url: &str,
        filename: &str,
    ) -> Result<DownloadResult, IoError> {
        let started = Instant::now();
        let fetched = self.fetcher.fetch(url).await;
        let elapsed = started.elapsed();

        let result = match fetched {
            Ok(response) if response.status < 300 => {
                let path = self.save(platform, filename, &response.body)?;
                DownloadResult {
                    url: url.to_string(),
                    http_status: Some(response.status),
                    retry_after: None,
                    outcome: DownloadOutcome::Saved {
                        path,
                        body: response.body,
                    },
                }
            }
            Ok(response) => {
                let retry_after = response
                    .retry_after
                    .as_deref()
                    .and_then(|v| parse_retry_after(v, Utc::now()));
                let outcome = if response.status == FORBIDDEN {
                    DownloadOutcome::Forbidden
                } else {
                    DownloadOutcome::Failed
                };
                debug!("{} returned HTTP {}", url, response.status);
                DownloadResult {
                    url: url.to_string(),
                    http_status: Some(response.status),
                    retry_after,
                    outcome,
                }
            }
            Err(e) => {
                warn!("{}", e);
                DownloadResult {
                    url: url.to_string(),
                    http_status: None,
                    retry_after: None,
                    outcome: DownloadOutcome::Forbidden,
                }
            }
        };

        if platform == Platform::Npm {
            let wait = self.npm_delay.saturating_sub(elapsed);
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }

        Ok(result)
    }

    fn save(&self, platform: Platform, filename: &str, body: &str) -> Result<PathBuf, IoError> {
        let dir = self.platform_dir(platform);
        fs::create_dir_all(&dir).map_err(|e| IoError::create_dir(&dir, e))?;

        let path = dir.join(filename);
        fs::write(&path, body).map_err(|e| IoError::write(&path, e))?;
        Ok(path)
    }
}
