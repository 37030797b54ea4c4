//! license-inventory - Third-party dependency license inventory library
//!
//! This library parses dependency manifests of seven ecosystems, resolves
//! each dependency's license from registries and forges, and keeps
//! per-platform license and error files across runs:
//! - Gradle (build.gradle, build.gradle.kts)
//! - npm (package.json)
//! - Cargo (Cargo.lock)
//! - Go (go.mod)
//! - Flutter (pubspec.yaml)
//! - Swift (Package.swift)
//! - CocoaPods (Podfile)

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod license;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod resolve;
