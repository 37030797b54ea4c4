//! Manifest file detection and parsing
//!
//! This module provides functionality to:
//! - Detect manifest files anywhere under a source directory
//! - Strip comments and prepare lines per format
//! - Isolate dependency sections (brace or indentation scoped)
//! - Extract dependency identities for the seven supported platforms
//! - Deduplicate identities into a canonical order

mod blocks;
mod cargo_lock;
mod comments;
mod dedup;
mod detector;
mod go_mod;
mod gradle;
mod package_json;
mod package_swift;
mod podfile;
mod pubspec_yaml;

pub use blocks::{BlockExtractor, RawBlock};
pub use cargo_lock::CargoLockParser;
pub use comments::{strip_comments, CommentSyntax};
pub use dedup::deduplicate;
pub use detector::{detect_manifests, ManifestInfo};
pub use go_mod::GoModParser;
pub use gradle::GradleParser;
pub use package_json::PackageJsonParser;
pub use package_swift::{PackageSwiftParser, GITHUB_PREFIXES};
pub use podfile::PodfileParser;
pub use pubspec_yaml::PubspecYamlParser;

use crate::domain::{ManifestDependency, Platform};
use crate::error::ManifestError;
use std::path::Path;

/// Trait for extracting dependencies from prepared manifest lines
///
/// Implementations are stateless: the result depends on the input lines only.
pub trait ManifestParser {
    /// Parse dependencies from lines produced by [`prepare_lines`]
    fn parse(&self, lines: &[String]) -> Vec<ManifestDependency>;

    /// Returns the platform this parser handles
    fn platform(&self) -> Platform;
}

/// Get a manifest parser for the specified platform
pub fn get_parser(platform: Platform) -> Box<dyn ManifestParser> {
    match platform {
        Platform::Gradle => Box::new(GradleParser),
        Platform::Npm => Box::new(PackageJsonParser),
        Platform::Cargo => Box::new(CargoLockParser),
        Platform::Go => Box::new(GoModParser),
        Platform::Flutter => Box::new(PubspecYamlParser),
        Platform::Swift => Box::new(PackageSwiftParser),
        Platform::CocoaPods => Box::new(PodfileParser),
    }
}

/// Strips comments and normalizes lines for a platform's parser
///
/// Flutter keeps its raw lines since its sections are scoped by
/// indentation. Other formats are trimmed, blank lines dropped and single
/// quotes turned into double quotes.
pub fn prepare_lines(platform: Platform, content: &str) -> Result<Vec<String>, ManifestError> {
    let raw: Vec<&str> = content.lines().collect();
    let stripped = strip_comments(&raw, &CommentSyntax::for_platform(platform))?;

    if platform == Platform::Flutter {
        return Ok(stripped);
    }

    Ok(stripped
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.replace('\'', "\""))
        .collect())
}

/// Parse dependencies from manifest content
pub fn parse_content(
    platform: Platform,
    content: &str,
) -> Result<Vec<ManifestDependency>, ManifestError> {
    let lines = prepare_lines(platform, content)?;
    Ok(get_parser(platform).parse(&lines))
}

/// Parse dependencies from a manifest file path
pub fn parse_manifest(path: &Path) -> Result<(Platform, Vec<ManifestDependency>), ManifestError> {
    let platform = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(Platform::from_filename)
        .ok_or_else(|| ManifestError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

    let content = std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
    Ok((platform, parse_content(platform, &content)?))
}
