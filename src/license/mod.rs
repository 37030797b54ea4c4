//! License extraction from downloaded documents
//!
//! This module provides:
//! - GitHub repository search JSON (`github`)
//! - Maven Central version JSON and POM XML (`maven_central`)
//! - crates.io JSON text scan (`crates_io`)
//! - Generic HTML heading scan (`html`)
//! - pkg.go.dev and github.com page scraping for Go modules (`go`)
//!
//! Extractors never fail: a document without the expected structure yields
//! absent values, which are persisted as the `None` marker.

mod crates_io;
mod github;
mod go;
mod html;
mod maven_central;

pub use crates_io::extract_crates_io_license;
pub use github::{extract_github_search, MAX_TOTAL_COUNT};
pub use go::{extract_github_page_license, extract_pkg_go_dev_license};
pub use html::{collapse_whitespace, extract_heading_license};
pub use maven_central::{extract_latest_version, extract_pom};

use crate::registry::Endpoint;

/// Project name and license read from a project-level document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectLicense {
    /// Project name reported by the document
    pub name: Option<String>,
    /// License name reported by the document
    pub license: Option<String>,
}

impl ProjectLicense {
    /// Resolved fields in persisted order
    pub fn into_fields(self) -> Vec<Option<String>> {
        vec![self.name, self.license]
    }
}

/// Extracts the license of a single-license page
///
/// Project-level endpoints (GitHub search, Maven Central) have dedicated
/// extractors and yield `None` here.
pub fn extract_page_license(endpoint: Endpoint, body: &str) -> Option<String> {
    match endpoint {
        Endpoint::CratesIo => extract_crates_io_license(body),
        Endpoint::GoPkg => extract_pkg_go_dev_license(body),
        Endpoint::GoGithub => extract_github_page_license(body),
        Endpoint::PubDev => extract_heading_license(body).map(|l| strip_license_link(&l)),
        Endpoint::Npm | Endpoint::SwiftGithub | Endpoint::CocoaPods => {
            extract_heading_license(body)
        }
        Endpoint::GithubSearch | Endpoint::MavenCentralVersion | Endpoint::MavenCentralPom => None,
    }
}

/// Removes the trailing `(LICENSE)` link text pub.dev appends to the license name
fn strip_license_link(license: &str) -> String {
    let lowered = license.to_lowercase();
    match lowered.rfind("(license)") {
        Some(p) if p + "(license)".len() == lowered.len() => license[..p].trim_end().to_string(),
        _ => license.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_level_endpoints_yield_none() {
        assert_eq!(extract_page_license(Endpoint::GithubSearch, "{}"), None);
        assert_eq!(extract_page_license(Endpoint::MavenCentralPom, "<project/>"), None);
    }

    #[test]
    fn test_pub_dev_strips_license_link() {
        let body = r#"<html><body>
            <h3 class="title">License</h3>
            <p><img src="x.svg" height="16"/>BSD-3-Clause (<a href="/packages/http/license">LICENSE</a>)</p>
        </body></html>"#;
        assert_eq!(
            extract_page_license(Endpoint::PubDev, body),
            Some("BSD-3-Clause".to_string())
        );
    }

    #[test]
    fn test_crates_io_dispatch() {
        let body = r#"{"versions":[{"license":"MIT OR Apache-2.0"}]}"#;
        assert_eq!(
            extract_page_license(Endpoint::CratesIo, body),
            Some("MIT OR Apache-2.0".to_string())
        );
    }

    #[test]
    fn test_into_fields_order() {
        let found = ProjectLicense {
            name: Some("okhttp".to_string()),
            license: Some("Apache-2.0".to_string()),
        };
        assert_eq!(
            found.into_fields(),
            vec![Some("okhttp".to_string()), Some("Apache-2.0".to_string())]
        );
    }
}
