//! Terminal feedback for an inventory run
//!
//! A run has two phases: a spinner while manifests are found and parsed,
//! then a bar over every dependency to resolve. During resolution the bar
//! prefix names the platform being processed and the message shows the
//! current component with the number of unresolved dependencies so far.
//! Everything is drawn on stderr, so a JSON report on stdout stays clean.

use crate::domain::{ManifestDependency, Platform};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const BAR_TEMPLATE: &str =
    "{spinner:.cyan} {prefix:>10.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// Phase of the run currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Manifest discovery and parsing
    Discovery,
    /// License resolution
    Resolution,
}

/// Progress reporter for an inventory run
///
/// Counting works the same whether or not anything is drawn.
pub struct Progress {
    /// Whether anything is drawn (off in quiet and JSON modes)
    enabled: bool,
    bar: Option<ProgressBar>,
    phase: Option<Phase>,
    unresolved: AtomicU64,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            bar: None,
            phase: None,
            unresolved: AtomicU64::new(0),
        }
    }

    /// Create a reporter that draws nothing
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Phase currently shown, if any
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Dependencies counted as unresolved since the resolution phase began
    pub fn unresolved(&self) -> u64 {
        self.unresolved.load(Ordering::Relaxed)
    }

    /// Enter the discovery phase
    pub fn discovering(&mut self) {
        self.clear();
        self.phase = Some(Phase::Discovery);
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template(SPINNER_TEMPLATE)
                .expect("Invalid template"),
        );
        spinner.set_message("Detecting manifest files...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Enter the resolution phase over `total` dependencies
    pub fn resolving(&mut self, total: u64) {
        self.clear();
        self.phase = Some(Phase::Resolution);
        self.unresolved.store(0, Ordering::Relaxed);
        if !self.enabled || total == 0 {
            return;
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .expect("Invalid template")
                .progress_chars("█▓▒░"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Show the dependency about to be requested
    pub fn dependency(&self, platform: Platform, dependency: &ManifestDependency) {
        if let Some(ref bar) = self.bar {
            bar.set_prefix(platform.display_name());
            bar.set_message(self.status(&dependency.component));
        }
    }

    /// Count one dependency as done
    pub fn done(&self, resolved: bool) {
        if !resolved {
            self.unresolved.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Print a line above the bar, or to stderr without one
    pub fn println(&self, line: &str) {
        match self.bar {
            Some(ref bar) => bar.println(line),
            None if self.enabled => eprintln!("{}", line),
            None => {}
        }
    }

    /// Remove whatever is drawn and leave the current phase
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        self.phase = None;
    }

    fn status(&self, component: &str) -> String {
        match self.unresolved() {
            0 => component.to_string(),
            n => format!("{} ({} unresolved)", component, n),
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        let mut progress = Progress::disabled();
        assert_eq!(progress.phase(), None);
        progress.discovering();
        assert_eq!(progress.phase(), Some(Phase::Discovery));
        progress.resolving(2);
        assert_eq!(progress.phase(), Some(Phase::Resolution));
        progress.clear();
        assert_eq!(progress.phase(), None);
    }

    #[test]
    fn test_counts_unresolved_without_drawing() {
        let mut progress = Progress::disabled();
        progress.resolving(3);
        progress.dependency(Platform::Npm, &ManifestDependency::new("lodash"));
        progress.done(true);
        progress.done(false);
        progress.done(false);
        assert_eq!(progress.unresolved(), 2);
        assert_eq!(progress.status("axios"), "axios (2 unresolved)");

        progress.resolving(1);
        assert_eq!(progress.unresolved(), 0);
        assert_eq!(progress.status("axios"), "axios");
    }

    #[test]
    fn test_progress_enabled() {
        let mut progress = Progress::new(true);
        progress.resolving(2);
        progress.dependency(Platform::Cargo, &ManifestDependency::new("serde"));
        progress.done(true);
        progress.println("cargo: halted");
        progress.done(false);
        progress.clear();
    }
}
