//! Per-platform license resolution
//!
//! Handles:
//! - Gradle: GitHub repository search, then Maven Central (latest version
//!   lookup, then POM) when the search gives no license
//! - Go: the github.com page for GitHub-hosted modules, pkg.go.dev otherwise
//! - npm, Cargo, Flutter, Swift, CocoaPods: one registry or forge page
//!
//! A document that downloads but carries no usable data still resolves the
//! dependency, with `None` markers. Only download failures become errors.

use crate::domain::{ErrorCode, LicenseRecord, ManifestDependency, Platform};
use crate::error::IoError;
use crate::license::{
    extract_github_search, extract_latest_version, extract_page_license, extract_pom,
};
use crate::registry::{DownloadResult, Downloader, Endpoint, Placeholders, RetryAfter};
use tracing::debug;

/// Outcome of resolving one dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A document was obtained; the record may still carry `None` markers
    Resolved(LicenseRecord),
    /// The last download failed
    Failed {
        /// Status code, or transport failure
        code: ErrorCode,
        /// Rate-limit signal attached to the response
        retry_after: Option<RetryAfter>,
        /// 403 or no response: the platform must not be queried further
        hard: bool,
    },
}

impl Resolution {
    fn from_failure(result: &DownloadResult) -> Self {
        Resolution::Failed {
            code: result.error_code().unwrap_or(ErrorCode::Transport),
            retry_after: result.retry_after.clone(),
            hard: result.is_hard_error(),
        }
    }
}

/// Endpoint queried for a single-page platform
pub fn page_endpoint(platform: Platform, dependency: &ManifestDependency) -> Option<Endpoint> {
    match platform {
        Platform::Npm => Some(Endpoint::Npm),
        Platform::Cargo => Some(Endpoint::CratesIo),
        Platform::Flutter => Some(Endpoint::PubDev),
        Platform::Swift => Some(Endpoint::SwiftGithub),
        Platform::CocoaPods => Some(Endpoint::CocoaPods),
        Platform::Go if dependency.component.contains("github") => Some(Endpoint::GoGithub),
        Platform::Go => Some(Endpoint::GoPkg),
        Platform::Gradle => None,
    }
}

/// Resolves dependencies to license records through the download client
pub struct Resolver {
    downloader: Downloader,
}

impl Resolver {
    /// Create a resolver downloading through `downloader`
    pub fn new(downloader: Downloader) -> Self {
        Self { downloader }
    }

    /// Get the underlying download client
    pub fn downloader(&self) -> &Downloader {
        &self.downloader
    }

    /// Resolve one dependency
    ///
    /// # Errors
    ///
    /// Returns an error only when a downloaded document cannot be saved.
    pub async fn resolve(
        &self,
        platform: Platform,
        dependency: &ManifestDependency,
    ) -> Result<Resolution, IoError> {
        match page_endpoint(platform, dependency) {
            Some(endpoint) => self.resolve_page(platform, endpoint, dependency).await,
            None => self.resolve_gradle(dependency).await,
        }
    }

    async fn resolve_page(
        &self,
        platform: Platform,
        endpoint: Endpoint,
        dependency: &ManifestDependency,
    ) -> Result<Resolution, IoError> {
        let placeholders = Placeholders::component(&dependency.component);
        let result = self
            .downloader
            .download(platform, endpoint, &placeholders)
            .await?;

        Ok(match result.body() {
            Some(body) => {
                let license = extract_page_license(endpoint, body);
                Resolution::Resolved(LicenseRecord::new(
                    platform,
                    dependency.clone(),
                    vec![license],
                ))
            }
            None => Resolution::from_failure(&result),
        })
    }

    async fn resolve_gradle(&self, dependency: &ManifestDependency) -> Result<Resolution, IoError> {
        let platform = Platform::Gradle;
        let component = dependency.component.as_str();

        let search = self
            .downloader
            .download(platform, Endpoint::GithubSearch, &Placeholders::component(component))
            .await?;
        if search.is_hard_error() || search.retry_after.is_some() {
            return Ok(Resolution::from_failure(&search));
        }
        let searched = search.body().map(extract_github_search);
        if let Some(found) = &searched {
            if found.license.is_some() {
                return Ok(Resolution::Resolved(LicenseRecord::new(
                    platform,
                    dependency.clone(),
                    found.clone().into_fields(),
                )));
            }
        }

        let Some(namespace) = dependency.namespace.as_deref() else {
            return Ok(match searched {
                Some(found) => Resolution::Resolved(LicenseRecord::new(
                    platform,
                    dependency.clone(),
                    found.into_fields(),
                )),
                None => Resolution::from_failure(&search),
            });
        };
        debug!("No license from GitHub for {}, trying Maven Central", dependency);

        let group = namespace.replace('/', ".");
        let lookup = self
            .downloader
            .download(
                platform,
                Endpoint::MavenCentralVersion,
                &Placeholders::component(component).with_namespace(&group),
            )
            .await?;
        let Some(body) = lookup.body() else {
            return Ok(Resolution::from_failure(&lookup));
        };
        let Some(version) = extract_latest_version(body) else {
            return Ok(Resolution::Resolved(LicenseRecord::new(
                platform,
                dependency.clone(),
                Vec::new(),
            )));
        };

        let group_path = namespace.replace('.', "/");
        let pom = self
            .downloader
            .download(
                platform,
                Endpoint::MavenCentralPom,
                &Placeholders::component(component)
                    .with_namespace(&group_path)
                    .with_version(&version),
            )
            .await?;

        Ok(match pom.body() {
            Some(body) => Resolution::Resolved(LicenseRecord::new(
                platform,
                dependency.clone(),
                extract_pom(body).into_fields(),
            )),
            None => Resolution::from_failure(&pom),
        })
    }
}
