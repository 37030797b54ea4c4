//! Inventory run summary types
//!
//! Provides structures for tracking results at platform and run levels.

use super::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A rate-limit signal surfaced to the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryNotice {
    /// Platform whose request was rate limited
    pub platform: Platform,
    /// Component being resolved
    pub component: String,
    /// HTTP status of the response
    pub status: u16,
    /// Absolute time after which the request may be retried
    pub retry_at: DateTime<Utc>,
    /// Remaining delay, formatted as `H:MM:SS` (with a day prefix when needed)
    pub delay: String,
}

/// A manifest that could not be parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseFailure {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Error description
    pub message: String,
}

/// Result counts for one platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSummary {
    /// Platform these counts belong to
    pub platform: Platform,
    /// Number of manifest files parsed
    pub manifests: usize,
    /// Number of distinct dependencies processed
    pub dependencies: usize,
    /// Dependencies resolved into license records
    pub resolved: usize,
    /// Dependencies recorded in the error file
    pub unresolved: usize,
    /// Whether the error ceiling halted network calls for this platform
    pub halted: bool,
}

impl PlatformSummary {
    /// Creates an empty summary
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            manifests: 0,
            dependencies: 0,
            resolved: 0,
            unresolved: 0,
            halted: false,
        }
    }
}

/// Overall summary of an inventory run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryReport {
    /// Directory receiving license and error files
    pub output_dir: PathBuf,
    /// Per-platform results, in platform order
    pub platforms: Vec<PlatformSummary>,
    /// Rate-limit signals met during the run
    pub retry_notices: Vec<RetryNotice>,
    /// Manifests skipped because they failed to parse
    pub parse_failures: Vec<ParseFailure>,
}

impl InventoryReport {
    /// Creates an empty report
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            platforms: Vec::new(),
            retry_notices: Vec::new(),
            parse_failures: Vec::new(),
        }
    }

    /// Returns the total number of dependencies processed
    pub fn total_dependencies(&self) -> usize {
        self.platforms.iter().map(|p| p.dependencies).sum()
    }

    /// Returns the total number of resolved dependencies
    pub fn total_resolved(&self) -> usize {
        self.platforms.iter().map(|p| p.resolved).sum()
    }

    /// Returns the total number of unresolved dependencies
    pub fn total_unresolved(&self) -> usize {
        self.platforms.iter().map(|p| p.unresolved).sum()
    }

    /// Returns true if anything stayed unresolved or failed to parse
    pub fn has_failures(&self) -> bool {
        self.total_unresolved() > 0 || !self.parse_failures.is_empty()
    }

    /// Returns the summary for a platform
    pub fn platform(&self, platform: Platform) -> Option<&PlatformSummary> {
        self.platforms.iter().find(|p| p.platform == platform)
    }
}
