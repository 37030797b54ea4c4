//! Error ledger
//!
//! Handles:
//! - Sequential resolution of one platform's dependencies with a
//!   consecutive-error counter
//! - Halting a platform after a 403, a transport failure or too many
//!   consecutive failures; the remaining dependencies are recorded as
//!   `successive authorized errors` without any request
//! - Persistence and reconciliation of the license and error files (`store`)

mod store;

pub use store::{LedgerStore, DATE_FORMAT, LICENSES_HEADER};

use crate::domain::{ErrorCode, ErrorRecord, LicenseRecord, ManifestDependency, Platform, RetryNotice};
use crate::error::IoError;
use crate::progress::Progress;
use crate::resolve::{Resolution, Resolver};
use tracing::{info, warn};

/// Results of processing one platform
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformOutcome {
    /// Platform processed
    pub platform: Platform,
    /// Resolved dependencies, in processing order
    pub licenses: Vec<LicenseRecord>,
    /// Unresolved dependencies, in processing order
    pub errors: Vec<ErrorRecord>,
    /// Rate-limit signals received
    pub retry_notices: Vec<RetryNotice>,
    /// Whether requests stopped before the end of the list
    pub halted: bool,
}

impl PlatformOutcome {
    fn new(platform: Platform) -> Self {
        Self {
            platform,
            licenses: Vec::new(),
            errors: Vec::new(),
            retry_notices: Vec::new(),
            halted: false,
        }
    }
}

/// Resolve the dependencies of one platform in order
///
/// `max_errors` consecutive failures, or a single hard failure, halt the
/// platform for the rest of the list.
///
/// # Errors
///
/// Returns an error when a downloaded document cannot be saved.
pub async fn process_platform(
    resolver: &Resolver,
    platform: Platform,
    dependencies: &[ManifestDependency],
    max_errors: usize,
    progress: &Progress,
) -> Result<PlatformOutcome, IoError> {
    let mut outcome = PlatformOutcome::new(platform);
    let mut consecutive = 0usize;

    for dependency in dependencies {
        progress.dependency(platform, dependency);

        if outcome.halted {
            outcome.errors.push(ErrorRecord::new(
                platform,
                ErrorCode::SuccessiveErrors,
                dependency.clone(),
            ));
            progress.done(false);
            continue;
        }

        match resolver.resolve(platform, dependency).await? {
            Resolution::Resolved(record) => {
                consecutive = 0;
                info!(
                    "{} {}: {}",
                    platform,
                    dependency,
                    record.license().unwrap_or("no license found")
                );
                outcome.licenses.push(record);
                progress.done(true);
            }
            Resolution::Failed {
                code,
                retry_after,
                hard,
            } => {
                consecutive += 1;
                info!("{} {}: error code={}", platform, dependency, code);

                if let (Some(retry), ErrorCode::Status(status)) = (retry_after, code) {
                    warn!(
                        "{} rate limited {} (HTTP {}): retry after {} (in {})",
                        platform,
                        dependency.component,
                        status,
                        retry.at_label(),
                        retry.delay_label()
                    );
                    outcome.retry_notices.push(RetryNotice {
                        platform,
                        component: dependency.component.clone(),
                        status,
                        retry_at: retry.at,
                        delay: retry.delay_label(),
                    });
                }

                outcome
                    .errors
                    .push(ErrorRecord::new(platform, code, dependency.clone()));
                progress.done(false);

                if hard || consecutive >= max_errors {
                    outcome.halted = true;
                    warn!(
                        "Halting {} after {} consecutive error(s){}",
                        platform,
                        consecutive,
                        if hard { ", last one not retryable" } else { "" }
                    );
                }
            }
        }
    }

    Ok(outcome)
}
