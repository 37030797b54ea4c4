//! Core domain models for license-inventory
//!
//! This module contains the fundamental types used throughout the application:
//! - Platform types for supported ecosystems
//! - Dependency identities extracted from manifests
//! - License and error records persisted per platform
//! - Summary and report structures

mod dependency;
mod platform;
mod record;
mod summary;

pub use dependency::{ManifestDependency, FIELD_SEPARATOR, NONE_MARKER};
pub use platform::Platform;
pub use record::{ErrorCode, ErrorRecord, LicenseRecord};
pub use summary::{InventoryReport, ParseFailure, PlatformSummary, RetryNotice};
