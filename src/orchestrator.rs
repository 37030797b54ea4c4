//! Inventory orchestrator coordinating the entire workflow
//!
//! This module provides:
//! - Workflow coordination: detect → parse → dedup → resolve → persist
//! - Selection of new dependencies, previous errors, or both
//! - Strictly sequential resolution, platform after platform
//! - Partial continuation: unparsable manifests are reported and skipped

use crate::config::InventoryConfig;
use crate::domain::{InventoryReport, ManifestDependency, ParseFailure, Platform, PlatformSummary};
use crate::error::{AppError, IoError};
use crate::ledger::{process_platform, LedgerStore};
use crate::manifest::{deduplicate, detect_manifests, parse_manifest};
use crate::progress::Progress;
use crate::registry::{Downloader, Fetcher, HttpClient};
use crate::resolve::Resolver;
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

/// Dependencies gathered for one platform before resolution
#[derive(Debug, Default)]
struct Collected {
    manifests: usize,
    dependencies: Vec<ManifestDependency>,
}

/// Orchestrator for an inventory run
pub struct Inventory {
    /// Run configuration
    config: InventoryConfig,
    /// License resolution through the download client
    resolver: Resolver,
    /// License and error files
    store: LedgerStore,
}

impl Inventory {
    /// Create an inventory using a real HTTP client
    pub fn new(config: InventoryConfig) -> Result<Self, AppError> {
        let client = HttpClient::with_config(config.timeout(), &config.user_agent)?;
        Ok(Self::with_fetcher(config, Arc::new(client)))
    }

    /// Create an inventory with a custom fetcher (for testing)
    pub fn with_fetcher(config: InventoryConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let downloader =
            Downloader::new(fetcher, &config.output_dir).with_npm_delay(config.npm_delay());
        let store = LedgerStore::new(&config.output_dir);
        Self {
            config,
            resolver: Resolver::new(downloader),
            store,
        }
    }

    /// Get the run configuration
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Run the inventory workflow
    pub async fn run(&self) -> Result<InventoryReport, AppError> {
        self.run_with_progress(true).await
    }

    /// Run the inventory workflow with optional progress display
    ///
    /// # Errors
    ///
    /// A missing source directory and any failure to write the output
    /// directory are fatal.
    pub async fn run_with_progress(&self, show_progress: bool) -> Result<InventoryReport, AppError> {
        let run_date = Local::now().naive_local();
        self.run_at(run_date, show_progress).await
    }

    /// Run the inventory workflow, stamping ledger sections with `run_date`
    pub async fn run_at(
        &self,
        run_date: NaiveDateTime,
        show_progress: bool,
    ) -> Result<InventoryReport, AppError> {
        let mut progress = Progress::new(show_progress);
        let mut report = InventoryReport::new(&self.config.output_dir);
        let mut collected: BTreeMap<Platform, Collected> = BTreeMap::new();

        // Step 1: Detect and parse manifest files
        if self.config.mode.uses_manifests() {
            progress.discovering();
            self.collect_manifests(&mut collected, &mut report)?;
            progress.clear();
        }

        // Step 2: Read back the previous run's errors
        if self.config.mode.uses_previous_errors() {
            for &platform in Platform::all() {
                let previous = self.store.read_previous_errors(platform)?;
                if !previous.is_empty() {
                    info!("{}: {} dependencies left on error", platform, previous.len());
                    collected
                        .entry(platform)
                        .or_default()
                        .dependencies
                        .extend(previous.into_iter().map(|r| r.dependency));
                }
            }
        }

        // Step 3: Deduplicate per platform
        for entry in collected.values_mut() {
            entry.dependencies = deduplicate(std::mem::take(&mut entry.dependencies));
        }

        let total: usize = collected.values().map(|c| c.dependencies.len()).sum();
        if total == 0 {
            info!("No dependency to resolve");
        }

        // Step 4: Resolve, one platform at a time, and persist as we go
        progress.resolving(total as u64);
        for &platform in Platform::all() {
            let Some(entry) = collected.get(&platform) else {
                continue;
            };

            let mut summary = PlatformSummary::new(platform);
            summary.manifests = entry.manifests;
            summary.dependencies = entry.dependencies.len();

            if !entry.dependencies.is_empty() {
                let outcome = process_platform(
                    &self.resolver,
                    platform,
                    &entry.dependencies,
                    self.config.max_errors,
                    &progress,
                )
                .await?;

                self.store
                    .save(platform, &outcome.licenses, &outcome.errors, run_date)?;

                if outcome.halted {
                    progress.println(&format!(
                        "{}: requests halted, remaining dependencies recorded as errors",
                        platform
                    ));
                }
                summary.resolved = outcome.licenses.len();
                summary.unresolved = outcome.errors.len();
                summary.halted = outcome.halted;
                report.retry_notices.extend(outcome.retry_notices);
            }

            report.platforms.push(summary);
        }
        progress.clear();

        Ok(report)
    }

    fn collect_manifests(
        &self,
        collected: &mut BTreeMap<Platform, Collected>,
        report: &mut InventoryReport,
    ) -> Result<(), IoError> {
        let source = fs::canonicalize(&self.config.source_dir)
            .ok()
            .filter(|p| p.is_dir())
            .ok_or_else(|| IoError::directory_not_found(&self.config.source_dir))?;
        let output = fs::canonicalize(&self.config.output_dir).ok();

        let manifests = detect_manifests(&source, &self.config.filenames, output.as_deref());
        info!("Found {} manifest file(s) under {}", manifests.len(), source.display());

        for manifest in manifests {
            match parse_manifest(&manifest.path) {
                Ok((platform, dependencies)) => {
                    info!(
                        "{}: {} dependencies in {}",
                        platform,
                        dependencies.len(),
                        manifest.path.display()
                    );
                    let entry = collected.entry(platform).or_default();
                    entry.manifests += 1;
                    entry.dependencies.extend(dependencies);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", manifest.path.display(), e);
                    report.parse_failures.push(ParseFailure {
                        path: manifest.path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
