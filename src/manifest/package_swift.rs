//! Package.swift parser for Swift Package Manager projects
//!
//! Reads `.package(url: "...")` entries of the `dependencies: [ ]` list.
//! Only GitHub-hosted packages are kept; the component is the full URL.

use crate::domain::{ManifestDependency, Platform};
use crate::manifest::{BlockExtractor, ManifestParser};

/// Parser for Package.swift files
pub struct PackageSwiftParser;

/// Hosts a Swift package URL must start with
pub const GITHUB_PREFIXES: &[&str] = &["https://github.com/", "http://github.com/"];

impl PackageSwiftParser {
    /// Parses one member line of a `dependencies: [ ]` list
    pub fn parse_line(line: &str) -> Option<ManifestDependency> {
        if !line.contains(".package") {
            return None;
        }
        let after_url = &line[line.find("url:")? + "url:".len()..];
        let open = after_url.find('"')?;
        let quoted = &after_url[open + 1..];
        let url = quoted[..quoted.find('"')?].trim();

        if !GITHUB_PREFIXES.iter().any(|prefix| url.starts_with(prefix)) {
            return None;
        }
        Some(ManifestDependency::new(url))
    }
}

impl ManifestParser for PackageSwiftParser {
    fn parse(&self, lines: &[String]) -> Vec<ManifestDependency> {
        let Some(extractor) = BlockExtractor::for_platform(Platform::Swift) else {
            return Vec::new();
        };
        extractor
            .extract(lines)
            .lines
            .iter()
            .filter_map(|line| Self::parse_line(line))
            .collect()
    }

    fn platform(&self) -> Platform {
        Platform::Swift
    }
}
