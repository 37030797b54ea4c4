//! Registry access for license documents
//!
//! This module provides:
//! - HTTP client shared foundation behind the `Fetcher` seam
//! - Endpoint URL and filename templates
//! - The download client: fetch, classify, save
//! - `Retry-After` interpretation

mod client;
mod download;
mod endpoint;
mod retry_after;

pub use client::{FetchResponse, Fetcher, HttpClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use download::{DownloadOutcome, DownloadResult, Downloader, DEFAULT_NPM_DELAY};
pub use endpoint::{sanitize_filename, Endpoint, Placeholders};
pub use retry_after::{format_delay, parse_retry_after, RetryAfter};
