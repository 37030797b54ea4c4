//! go.mod parser for Go projects
//!
//! Handles:
//! - require statements (single and block)
//! - `// indirect` requirements, which are skipped

use crate::domain::{ManifestDependency, Platform};
use crate::manifest::{BlockExtractor, ManifestParser};
use regex::Regex;
use std::sync::LazyLock;

/// Parser for go.mod files
pub struct GoModParser;

// Regex for single require: require module/path v1.2.3
static SINGLE_REQUIRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^require\s+([^\s(]\S*)\s+\S+").unwrap());

fn is_indirect(line: &str) -> bool {
    line.replace(' ', "").contains("//indirect")
}

impl GoModParser {
    /// Parses one member line of a `require ( )` block
    pub fn parse_line(line: &str) -> Option<ManifestDependency> {
        if is_indirect(line) {
            return None;
        }
        line.split_whitespace().next().map(ManifestDependency::new)
    }
}

impl ManifestParser for GoModParser {
    fn parse(&self, lines: &[String]) -> Vec<ManifestDependency> {
        let mut dependencies: Vec<ManifestDependency> = lines
            .iter()
            .filter(|line| !is_indirect(line))
            .filter_map(|line| SINGLE_REQUIRE_RE.captures(line.trim()))
            .map(|caps| ManifestDependency::new(&caps[1]))
            .collect();

        if let Some(extractor) = BlockExtractor::for_platform(Platform::Go) {
            dependencies.extend(
                extractor
                    .extract(lines)
                    .lines
                    .iter()
                    .filter_map(|line| Self::parse_line(line)),
            );
        }

        dependencies
    }

    fn platform(&self) -> Platform {
        Platform::Go
    }
}
