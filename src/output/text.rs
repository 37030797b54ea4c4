//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-platform resolved/unresolved counts with colors
//! - Rate-limit notices with the absolute retry time and remaining delay
//! - Manifests skipped because they failed to parse
//! - Totals and the location of the license and error files

use crate::domain::{InventoryReport, PlatformSummary};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn write_notices(&self, report: &InventoryReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if report.retry_notices.is_empty() {
            return Ok(());
        }

        writeln!(writer)?;
        if self.color {
            writeln!(writer, "{}", "Rate limited:".yellow().bold())?;
        } else {
            writeln!(writer, "Rate limited:")?;
        }
        for notice in &report.retry_notices {
            let when = notice.retry_at.format("%Y-%m-%d %H:%M:%S");
            if self.color {
                writeln!(
                    writer,
                    "  {} {} (HTTP {}): retry after {} {}",
                    notice.platform.display_name().dimmed(),
                    notice.component,
                    notice.status,
                    when.to_string().bold(),
                    format!("(in {})", notice.delay).dimmed()
                )?;
            } else {
                writeln!(
                    writer,
                    "  {} {} (HTTP {}): retry after {} (in {})",
                    notice.platform.display_name(),
                    notice.component,
                    notice.status,
                    when,
                    notice.delay
                )?;
            }
        }
        Ok(())
    }

    fn write_parse_failures(
        &self,
        report: &InventoryReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if report.parse_failures.is_empty() {
            return Ok(());
        }

        writeln!(writer)?;
        if self.color {
            writeln!(writer, "{}", "Skipped manifests:".red().bold())?;
        } else {
            writeln!(writer, "Skipped manifests:")?;
        }
        for failure in &report.parse_failures {
            writeln!(writer, "  {}: {}", failure.path.display(), failure.message)?;
        }
        Ok(())
    }

    fn write_totals(&self, report: &InventoryReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let resolved = report.total_resolved();
        let unresolved = report.total_unresolved();

        if self.color {
            writeln!(
                writer,
                "{} {} resolved, {} unresolved",
                "Total:".bold(),
                resolved.to_string().green(),
                if unresolved > 0 {
                    unresolved.to_string().red().to_string()
                } else {
                    unresolved.to_string().dimmed().to_string()
                }
            )?;
        } else {
            writeln!(writer, "Total: {} resolved, {} unresolved", resolved, unresolved)?;
        }

        if self.verbosity != Verbosity::Quiet && report.total_dependencies() > 0 {
            writeln!(writer, "Results written to {}", report.output_dir.display())?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &InventoryReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if report.platforms.is_empty() && report.parse_failures.is_empty() {
            if self.verbosity != Verbosity::Quiet {
                writeln!(writer, "No dependencies found.")?;
            }
            return Ok(());
        }

        if self.verbosity != Verbosity::Quiet {
            for summary in &report.platforms {
                self.format_platform(summary, writer)?;
            }
            self.write_notices(report, writer)?;
        }
        self.write_parse_failures(report, writer)?;

        if self.verbosity != Verbosity::Quiet {
            writeln!(writer)?;
        }
        self.write_totals(report, writer)
    }

    fn format_platform(
        &self,
        summary: &PlatformSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = format!("{:12}", summary.platform.display_name());
        let halted = if summary.halted { " halted" } else { "" };

        if self.color {
            write!(writer, "{}", name.bold())?;
            write!(
                writer,
                " {} resolved, {} unresolved",
                summary.resolved.to_string().green(),
                if summary.unresolved > 0 {
                    summary.unresolved.to_string().red().to_string()
                } else {
                    summary.unresolved.to_string()
                }
            )?;
            if self.verbosity == Verbosity::Verbose {
                write!(
                    writer,
                    " {}",
                    format!(
                        "({} dependencies, {} manifests)",
                        summary.dependencies, summary.manifests
                    )
                    .dimmed()
                )?;
            }
            writeln!(writer, "{}", halted.yellow())
        } else {
            write!(
                writer,
                "{} {} resolved, {} unresolved",
                name, summary.resolved, summary.unresolved
            )?;
            if self.verbosity == Verbosity::Verbose {
                write!(
                    writer,
                    " ({} dependencies, {} manifests)",
                    summary.dependencies, summary.manifests
                )?;
            }
            writeln!(writer, "{}", halted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParseFailure, Platform, RetryNotice};
    use chrono::{TimeZone, Utc};

    fn report() -> InventoryReport {
        let mut report = InventoryReport::new("licenses");
        report.platforms.push(PlatformSummary {
            platform: Platform::Npm,
            manifests: 2,
            dependencies: 5,
            resolved: 3,
            unresolved: 2,
            halted: true,
        });
        report.retry_notices.push(RetryNotice {
            platform: Platform::Npm,
            component: "lodash".to_string(),
            status: 429,
            retry_at: Utc.with_ymd_and_hms(2024, 2, 22, 17, 0, 0).unwrap(),
            delay: "1:01:00".to_string(),
        });
        report
    }

    fn render(formatter: &TextFormatter, report: &InventoryReport) -> String {
        let mut out = Vec::new();
        formatter.format(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let output = render(&TextFormatter::with_color(Verbosity::Normal, false), &report());
        assert!(output.contains("npm          3 resolved, 2 unresolved halted"));
        assert!(output.contains("npm lodash (HTTP 429): retry after 2024-02-22 17:00:00 (in 1:01:00)"));
        assert!(output.contains("Total: 3 resolved, 2 unresolved"));
        assert!(output.contains("Results written to licenses"));
    }

    #[test]
    fn test_verbose_shows_counts() {
        let output = render(&TextFormatter::with_color(Verbosity::Verbose, false), &report());
        assert!(output.contains("(5 dependencies, 2 manifests)"));
    }

    #[test]
    fn test_quiet_keeps_totals_and_failures() {
        let mut report = report();
        report.parse_failures.push(ParseFailure {
            path: "app/go.mod".into(),
            message: "unterminated block comment starting at line 2".to_string(),
        });
        let output = render(&TextFormatter::with_color(Verbosity::Quiet, false), &report);
        assert!(!output.contains("retry after"));
        assert!(output.contains("app/go.mod: unterminated block comment"));
        assert!(output.contains("Total: 3 resolved, 2 unresolved"));
    }

    #[test]
    fn test_empty_report() {
        let output = render(
            &TextFormatter::with_color(Verbosity::Normal, false),
            &InventoryReport::new("licenses"),
        );
        assert_eq!(output, "No dependencies found.\n");
    }

    #[test]
    fn test_colored_output_contains_values() {
        let output = render(&TextFormatter::new(Verbosity::Normal), &report());
        assert!(output.contains("lodash"));
        assert!(output.contains("1:01:00"));
    }
}
