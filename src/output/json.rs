//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the run report
//! - Per-platform counts, rate-limit notices and parse failures

use crate::domain::{InventoryReport, PlatformSummary};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Directory holding license and error files
    output_dir: String,
    /// Summary statistics
    summary: JsonSummary,
    /// Per-platform results
    platforms: Vec<JsonPlatform>,
    /// Rate-limit signals
    #[serde(skip_serializing_if = "Vec::is_empty")]
    retry_after: Vec<JsonRetry<'a>>,
    /// Manifests that failed to parse
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parse_failures: Vec<JsonParseFailure>,
}

/// JSON representation of totals
#[derive(Serialize)]
struct JsonSummary {
    dependencies: usize,
    resolved: usize,
    unresolved: usize,
}

/// JSON representation of a platform summary
#[derive(Serialize)]
struct JsonPlatform {
    platform: String,
    resolved: usize,
    unresolved: usize,
    halted: bool,
    /// Only in verbose mode
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies: Option<usize>,
    /// Only in verbose mode
    #[serde(skip_serializing_if = "Option::is_none")]
    manifests: Option<usize>,
}

/// JSON representation of a rate-limit notice
#[derive(Serialize)]
struct JsonRetry<'a> {
    platform: String,
    component: &'a str,
    status: u16,
    retry_at: String,
    delay: &'a str,
}

/// JSON representation of a parse failure
#[derive(Serialize)]
struct JsonParseFailure {
    path: String,
    message: String,
}

impl JsonFormatter {
    fn platform_to_json(&self, summary: &PlatformSummary) -> JsonPlatform {
        let verbose = self.verbosity == Verbosity::Verbose;
        JsonPlatform {
            platform: summary.platform.key().to_string(),
            resolved: summary.resolved,
            unresolved: summary.unresolved,
            halted: summary.halted,
            dependencies: verbose.then_some(summary.dependencies),
            manifests: verbose.then_some(summary.manifests),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &InventoryReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            output_dir: report.output_dir.display().to_string(),
            summary: JsonSummary {
                dependencies: report.total_dependencies(),
                resolved: report.total_resolved(),
                unresolved: report.total_unresolved(),
            },
            platforms: report
                .platforms
                .iter()
                .map(|p| self.platform_to_json(p))
                .collect(),
            retry_after: report
                .retry_notices
                .iter()
                .map(|n| JsonRetry {
                    platform: n.platform.key().to_string(),
                    component: &n.component,
                    status: n.status,
                    retry_at: n.retry_at.to_rfc3339(),
                    delay: &n.delay,
                })
                .collect(),
            parse_failures: report
                .parse_failures
                .iter()
                .map(|f| JsonParseFailure {
                    path: f.path.display().to_string(),
                    message: f.message.clone(),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }

    fn format_platform(
        &self,
        summary: &PlatformSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &self.platform_to_json(summary))?;
        writeln!(writer)
    }
}
