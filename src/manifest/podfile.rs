//! Podfile parser for CocoaPods projects

use crate::domain::{ManifestDependency, Platform};
use crate::manifest::ManifestParser;

/// Parser for Podfile files
pub struct PodfileParser;

impl PodfileParser {
    /// Parses a `pod 'Name', '~> 1.0'` line into its first quoted token
    pub fn parse_line(line: &str) -> Option<ManifestDependency> {
        let line = line.trim();
        if !line.starts_with("pod") {
            return None;
        }
        let open = line.find(['\'', '"'])?;
        let quote = line[open..].chars().next()?;
        let rest = &line[open + 1..];
        let name = &rest[..rest.find(quote)?];
        if name.is_empty() {
            return None;
        }
        Some(ManifestDependency::new(name))
    }
}

impl ManifestParser for PodfileParser {
    fn parse(&self, lines: &[String]) -> Vec<ManifestDependency> {
        lines.iter().filter_map(|l| Self::parse_line(l)).collect()
    }

    fn platform(&self) -> Platform {
        Platform::CocoaPods
    }
}
