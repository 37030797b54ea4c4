//! Registry and forge endpoints
//!
//! Each endpoint pairs a URL template with a filename template for the
//! downloaded document. Templates use the `[component]`, `[namespace]` and
//! `[version]` placeholders.

use crate::manifest::GITHUB_PREFIXES;
use std::fmt;

/// Values substituted into endpoint templates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placeholders<'a> {
    /// `[component]`
    pub component: &'a str,
    /// `[namespace]`
    pub namespace: Option<&'a str>,
    /// `[version]`
    pub version: Option<&'a str>,
}

impl<'a> Placeholders<'a> {
    /// Placeholders with a component only
    pub fn component(component: &'a str) -> Self {
        Self {
            component,
            ..Default::default()
        }
    }

    /// Sets the namespace (builder pattern)
    pub fn with_namespace(mut self, namespace: &'a str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Sets the version (builder pattern)
    pub fn with_version(mut self, version: &'a str) -> Self {
        self.version = Some(version);
        self
    }

    fn apply(&self, template: &str) -> String {
        template
            .replace("[component]", self.component)
            .replace("[namespace]", self.namespace.unwrap_or_default())
            .replace("[version]", self.version.unwrap_or_default())
    }
}

/// External documents queried to resolve a license
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// GitHub repository search (JSON)
    GithubSearch,
    /// Maven Central latest version lookup (JSON)
    MavenCentralVersion,
    /// Maven Central POM (XML)
    MavenCentralPom,
    /// npm package page (HTML)
    Npm,
    /// crates.io crate API (JSON)
    CratesIo,
    /// pkg.go.dev module page (HTML)
    GoPkg,
    /// github.com repository page of a Go module (HTML)
    GoGithub,
    /// pub.dev package page (HTML)
    PubDev,
    /// github.com repository page of a Swift package (HTML)
    SwiftGithub,
    /// cocoapods.org pod page (HTML)
    CocoaPods,
}

impl Endpoint {
    /// URL template
    pub fn url_template(&self) -> &'static str {
        match self {
            Endpoint::GithubSearch => "https://api.github.com/search/repositories?q=[component]",
            Endpoint::MavenCentralVersion => {
                "https://search.maven.org/solrsearch/select?q=g:[namespace]%20AND%20a:[component]"
            }
            Endpoint::MavenCentralPom => {
                "https://search.maven.org/remotecontent?filepath=[namespace]/[component]/[version]/[component]-[version].pom"
            }
            Endpoint::Npm => "https://www.npmjs.com/package/[component]",
            Endpoint::CratesIo => "https://crates.io/api/v1/crates/[component]",
            Endpoint::GoPkg => "https://pkg.go.dev/[component]",
            Endpoint::GoGithub => "https://[component]",
            Endpoint::PubDev => "https://pub.dev/packages/[component]",
            Endpoint::SwiftGithub => "[component]",
            Endpoint::CocoaPods => "https://cocoapods.org/pods/[component]",
        }
    }

    /// Filename template of the downloaded document
    pub fn filename_template(&self) -> &'static str {
        match self {
            Endpoint::GithubSearch => "[component]_github.json",
            Endpoint::MavenCentralVersion => "version_[component].json",
            Endpoint::MavenCentralPom => "[component]_maven_central.pom",
            Endpoint::CratesIo => "[component].json",
            Endpoint::Npm
            | Endpoint::GoPkg
            | Endpoint::GoGithub
            | Endpoint::PubDev
            | Endpoint::SwiftGithub
            | Endpoint::CocoaPods => "[component].html",
        }
    }

    /// Builds the request URL
    pub fn url(&self, placeholders: &Placeholders<'_>) -> String {
        placeholders.apply(self.url_template())
    }

    /// Builds the sanitized filename of the downloaded document
    ///
    /// Swift components are full URLs; the GitHub host is removed before
    /// templating so the filename keeps the owner and repository.
    pub fn filename(&self, placeholders: &Placeholders<'_>) -> String {
        let mut placeholders = *placeholders;
        if *self == Endpoint::SwiftGithub {
            if let Some(rest) = GITHUB_PREFIXES
                .iter()
                .find_map(|prefix| placeholders.component.strip_prefix(*prefix))
            {
                placeholders.component = rest;
            }
        }
        sanitize_filename(&placeholders.apply(self.filename_template()))
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::GithubSearch => "GitHub search",
            Endpoint::MavenCentralVersion => "Maven Central version",
            Endpoint::MavenCentralPom => "Maven Central POM",
            Endpoint::Npm => "npm",
            Endpoint::CratesIo => "crates.io",
            Endpoint::GoPkg => "pkg.go.dev",
            Endpoint::GoGithub => "github.com (Go)",
            Endpoint::PubDev => "pub.dev",
            Endpoint::SwiftGithub => "github.com (Swift)",
            Endpoint::CocoaPods => "cocoapods.org",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`, keeping the extension
pub fn sanitize_filename(filename: &str) -> String {
    let (stem, extension) = match filename.rfind('.') {
        Some(p) => filename.split_at(p),
        None => (filename, ""),
    };
    let stem: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}{}", stem, extension)
}
