//! Platform type definitions for supported package ecosystems

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported dependency ecosystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Gradle builds (build.gradle, build.gradle.kts)
    Gradle,
    /// npm packages (package.json)
    Npm,
    /// Rust crates (Cargo.lock)
    Cargo,
    /// Go modules (go.mod)
    Go,
    /// Flutter / pub packages (pubspec.yaml)
    Flutter,
    /// Swift packages (Package.swift)
    Swift,
    /// CocoaPods (Podfile)
    CocoaPods,
}

impl Platform {
    /// Returns the manifest filenames recognized for this platform
    pub fn manifest_filenames(&self) -> &'static [&'static str] {
        match self {
            Platform::Gradle => &["build.gradle", "build.gradle.kts"],
            Platform::Npm => &["package.json"],
            Platform::Cargo => &["Cargo.lock"],
            Platform::Go => &["go.mod"],
            Platform::Flutter => &["pubspec.yaml"],
            Platform::Swift => &["Package.swift"],
            Platform::CocoaPods => &["Podfile"],
        }
    }

    /// Returns the platform owning a manifest filename, if any
    pub fn from_filename(filename: &str) -> Option<Platform> {
        Platform::all()
            .iter()
            .copied()
            .find(|p| p.manifest_filenames().contains(&filename))
    }

    /// Stable key used for output file and directory names
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Gradle => "gradle",
            Platform::Npm => "npm",
            Platform::Cargo => "cargo",
            Platform::Go => "go",
            Platform::Flutter => "flutter",
            Platform::Swift => "swift",
            Platform::CocoaPods => "cocoapods",
        }
    }

    /// Returns the display name for this platform
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Gradle => "Gradle",
            Platform::Npm => "npm",
            Platform::Cargo => "Cargo",
            Platform::Go => "Go",
            Platform::Flutter => "Flutter",
            Platform::Swift => "Swift",
            Platform::CocoaPods => "CocoaPods",
        }
    }

    /// Number of identity fields written for a dependency of this platform
    ///
    /// Gradle dependencies always carry a namespace slot (possibly `None`),
    /// every other platform identifies a dependency by its component alone.
    pub fn identity_arity(&self) -> usize {
        match self {
            Platform::Gradle => 2,
            _ => 1,
        }
    }

    /// Number of resolved fields appended to a license record
    ///
    /// Gradle resolution yields a resolved project name and a license, the
    /// other platforms yield the license only.
    pub fn resolved_arity(&self) -> usize {
        match self {
            Platform::Gradle => 2,
            _ => 1,
        }
    }

    /// Returns all supported platforms
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Gradle,
            Platform::Npm,
            Platform::Cargo,
            Platform::Go,
            Platform::Flutter,
            Platform::Swift,
            Platform::CocoaPods,
        ]
    }

    /// Every manifest filename across all platforms
    pub fn all_manifest_filenames() -> Vec<&'static str> {
        Platform::all()
            .iter()
            .flat_map(|p| p.manifest_filenames().iter().copied())
            .collect()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
