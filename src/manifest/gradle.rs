//! Gradle manifest parser
//!
//! Handles:
//! - build.gradle (Groovy DSL) and build.gradle.kts (Kotlin DSL)
//! - String notation inside `dependencies { }`: `implementation "group:name:version"`
//! - Kotlin call notation: `implementation("group:name:version")`
//! - Quoted configuration names: `"kapt"("group:name:version")`
//!
//! Lines are expected prepared: trimmed, single quotes turned into double quotes.

use crate::domain::{ManifestDependency, Platform};
use crate::manifest::{BlockExtractor, ManifestParser};

/// Parser for build.gradle and build.gradle.kts files
pub struct GradleParser;

impl GradleParser {
    /// Parses one member line of a `dependencies` block
    ///
    /// The line must be `prefix "values"` where the prefix is a run of
    /// ASCII letters, optionally wrapped in quotes, and the opening quote of
    /// the values sits at most two characters after the prefix. Values split
    /// on `:`; with two or more fields the first is the group (dots become
    /// slashes) and the second the artifact.
    pub fn parse_line(line: &str) -> Option<ManifestDependency> {
        let line = line.trim();
        if line.is_empty() || line.ends_with('{') || line.starts_with("exclude") {
            return None;
        }

        let bytes = line.as_bytes();
        let leading_quote = bytes[0] == b'"';
        let prefix_start = usize::from(leading_quote);
        if !bytes.get(prefix_start)?.is_ascii_alphabetic() {
            return None;
        }

        let prefix_len = line[prefix_start..].find(|c: char| !c.is_ascii_alphabetic())?;
        let mut start = prefix_start + prefix_len;

        // A quoted prefix needs its closing quote, an unquoted one must not have one
        match (leading_quote, bytes[start] == b'"') {
            (true, true) => start += 1,
            (false, false) => {}
            _ => return None,
        }

        let rest = &line[start..];
        let open = rest.find('"')?;
        if open > 2 {
            return None;
        }

        let values = rest[open + 1..].replace('"', "");
        let values = match values.find("//") {
            Some(p) => &values[..p],
            None => values.as_str(),
        };
        // Closing paren of the call notation
        let values = values.trim_end().trim_end_matches([')', ',']);

        let fields: Vec<&str> = values.split(':').map(str::trim).collect();
        let dependency = if fields.len() >= 2 {
            ManifestDependency::new(fields[1]).with_namespace(fields[0].replace('.', "/"))
        } else {
            ManifestDependency::new(fields[0])
        };

        if dependency.component.is_empty() {
            return None;
        }
        Some(dependency)
    }
}

impl ManifestParser for GradleParser {
    fn parse(&self, lines: &[String]) -> Vec<ManifestDependency> {
        let Some(extractor) = BlockExtractor::for_platform(Platform::Gradle) else {
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
        Platform::Gradle
    }
}
