//! Resolution records persisted to the license and error files

use super::dependency::{FIELD_SEPARATOR, NONE_MARKER};
use super::{ManifestDependency, Platform};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Matches the `error code=<code>` prefix, tolerating spaces around `=`
static ERROR_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^error code\s*=\s*(.+)$").unwrap());

/// A dependency with its resolved fields
///
/// Resolved fields follow the identity fields. Gradle records carry a
/// resolved project name and a license, the other platforms a license only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Platform the dependency belongs to
    pub platform: Platform,
    /// Dependency identity
    pub dependency: ManifestDependency,
    /// Resolved values; `None` is written as the literal marker
    pub resolved: Vec<Option<String>>,
}

impl LicenseRecord {
    /// Creates a record, padding or truncating to the platform arity
    pub fn new(
        platform: Platform,
        dependency: ManifestDependency,
        mut resolved: Vec<Option<String>>,
    ) -> Self {
        resolved.resize(platform.resolved_arity(), None);
        Self {
            platform,
            dependency,
            resolved,
        }
    }

    /// Returns the license value, if one was found
    pub fn license(&self) -> Option<&str> {
        self.resolved.last().and_then(|v| v.as_deref())
    }

    /// Formats the record as one persisted line
    pub fn to_line(&self) -> String {
        let mut fields = self.dependency.fields(self.platform.identity_arity());
        fields.extend(
            self.resolved
                .iter()
                .map(|v| v.clone().unwrap_or_else(|| NONE_MARKER.to_string())),
        );
        fields.join(FIELD_SEPARATOR)
    }

    /// Reads the identity from a persisted license line
    pub fn identity_from_line(platform: Platform, line: &str) -> Option<ManifestDependency> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        ManifestDependency::from_fields(&fields, platform.identity_arity())
    }
}

/// Why a dependency could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "status")]
pub enum ErrorCode {
    /// Non-success HTTP status
    Status(u16),
    /// Connection failure or timeout, no status available
    Transport,
    /// Not attempted: the platform hit its error ceiling earlier in the run
    SuccessiveErrors,
}

impl ErrorCode {
    /// Parses the code part of a persisted error line
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if let Ok(status) = value.parse::<u16>() {
            ErrorCode::Status(status)
        } else if value == "network" {
            ErrorCode::Transport
        } else {
            ErrorCode::SuccessiveErrors
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Status(status) => write!(f, "{}", status),
            ErrorCode::Transport => write!(f, "network"),
            ErrorCode::SuccessiveErrors => write!(f, "successive authorized errors"),
        }
    }
}

/// A dependency whose license could not be resolved in a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Platform the dependency belongs to
    pub platform: Platform,
    /// Failure classification
    pub code: ErrorCode,
    /// Dependency identity
    pub dependency: ManifestDependency,
}

impl ErrorRecord {
    /// Creates a new error record
    pub fn new(platform: Platform, code: ErrorCode, dependency: ManifestDependency) -> Self {
        Self {
            platform,
            code,
            dependency,
        }
    }

    /// Formats the record as one persisted line
    pub fn to_line(&self) -> String {
        let mut fields = vec![format!("error code={}", self.code)];
        fields.extend(self.dependency.fields(self.platform.identity_arity()));
        fields.join(FIELD_SEPARATOR)
    }

    /// Parses a persisted error line; other lines yield `None`
    pub fn from_line(platform: Platform, line: &str) -> Option<Self> {
        let mut parts = line.trim().split(FIELD_SEPARATOR);
        let caps = ERROR_PREFIX_RE.captures(parts.next()?)?;
        let code = ErrorCode::parse(&caps[1]);
        let fields: Vec<&str> = parts.collect();
        let dependency = ManifestDependency::from_fields(&fields, platform.identity_arity())?;
        Some(Self::new(platform, code, dependency))
    }
}
