//! Manifest file discovery
//!
//! Walks the source tree recursively and keeps files whose name exactly
//! matches one of the configured manifest filenames.

use crate::domain::Platform;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Information about a detected manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Platform of the manifest
    pub platform: Platform,
}

impl ManifestInfo {
    /// Create a new ManifestInfo
    pub fn new(path: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            path: path.into(),
            platform,
        }
    }
}

/// Detect all manifest files under the given directory
///
/// Entries are visited in file-name order so results are stable. The
/// `exclude` directory (typically the output directory, which holds
/// downloaded documents) is not descended into.
pub fn detect_manifests(dir: &Path, filenames: &[String], exclude: Option<&Path>) -> Vec<ManifestInfo> {
    let mut manifests = Vec::new();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match exclude {
            Some(excluded) => entry.depth() == 0 || entry.path() != excluded,
            None => true,
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !filenames.iter().any(|f| f == name) {
            continue;
        }
        if let Some(platform) = Platform::from_filename(name) {
            manifests.push(ManifestInfo::new(entry.path(), platform));
        }
    }

    manifests
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    fn all_names() -> Vec<String> {
        Platform::all_manifest_filenames()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_detect_nested_manifests() {
        let dir = create_temp_dir();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::create_dir_all(dir.path().join("app").join("android")).unwrap();
        fs::write(dir.path().join("app").join("android").join("build.gradle"), "").unwrap();
        fs::write(dir.path().join("app").join("pubspec.yaml"), "").unwrap();

        let manifests = detect_manifests(dir.path(), &all_names(), None);
        assert_eq!(manifests.len(), 3);

        let platforms: Vec<_> = manifests.iter().map(|m| m.platform).collect();
        assert!(platforms.contains(&Platform::Npm));
        assert!(platforms.contains(&Platform::Gradle));
        assert!(platforms.contains(&Platform::Flutter));
    }

    #[test]
    fn test_detect_respects_configured_filenames() {
        let dir = create_temp_dir();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("go.mod"), "").unwrap();

        let manifests = detect_manifests(dir.path(), &["go.mod".to_string()], None);
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].platform, Platform::Go);
    }

    #[test]
    fn test_detect_exact_name_match() {
        let dir = create_temp_dir();
        fs::write(dir.path().join("package.json.bak"), "{}").unwrap();
        fs::write(dir.path().join("podfile"), "").unwrap();

        let manifests = detect_manifests(dir.path(), &all_names(), None);
        assert!(manifests.is_empty());
    }

    #[test]
    fn test_detect_skips_excluded_directory() {
        let dir = create_temp_dir();
        let out = dir.path().join("licenses");
        fs::create_dir_all(out.join("cargo")).unwrap();
        fs::write(out.join("cargo").join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("Cargo.lock"), "").unwrap();

        let manifests = detect_manifests(dir.path(), &all_names(), Some(&out));
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].platform, Platform::Cargo);
    }

    #[test]
    fn test_detect_empty_directory() {
        let dir = create_temp_dir();
        let manifests = detect_manifests(dir.path(), &all_names(), None);
        assert!(manifests.is_empty());
    }

    #[test]
    fn test_manifest_info_new() {
        let info = ManifestInfo::new("/test/go.mod", Platform::Go);
        assert_eq!(info.path, PathBuf::from("/test/go.mod"));
        assert_eq!(info.platform, Platform::Go);
    }
}
