//! Cargo.lock parser for Rust projects
//!
//! Every `[[package]]` stanza contributes the first `name = "..."` line
//! that follows it.

use crate::domain::{ManifestDependency, Platform};
use crate::manifest::ManifestParser;
use regex::Regex;
use std::sync::LazyLock;

/// Parser for Cargo.lock files
pub struct CargoLockParser;

const PACKAGE_MARKER: &str = "[[package]]";

// name = "serde"
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^name\s*=\s*"([^"]+)""#).unwrap());

impl ManifestParser for CargoLockParser {
    fn parse(&self, lines: &[String]) -> Vec<ManifestDependency> {
        let mut dependencies = Vec::new();
        let mut in_package = false;

        for line in lines {
            let trimmed = line.trim();
            if trimmed.starts_with(PACKAGE_MARKER) {
                in_package = true;
                continue;
            }
            if !in_package {
                continue;
            }
            if let Some(caps) = NAME_RE.captures(trimmed) {
                dependencies.push(ManifestDependency::new(&caps[1]));
                in_package = false;
            }
        }

        dependencies
    }

    fn platform(&self) -> Platform {
        Platform::Cargo
    }
}
