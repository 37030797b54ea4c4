//! Dependency identity structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal written in place of an absent field
pub const NONE_MARKER: &str = "None";

/// Separator between fields of a persisted line
pub const FIELD_SEPARATOR: &str = " : ";

/// Joins identity fields into a set key; never occurs inside a field
const KEY_SEPARATOR: char = '\u{1f}';

/// A dependency declared in a manifest
///
/// Identity is the ordered tuple of its present fields. Instances are built
/// by the manifest parsers and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ManifestDependency {
    /// Package, artifact or module name
    pub component: String,
    /// Group or owner path, when the format carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ManifestDependency {
    /// Creates a dependency identified by its component only
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            namespace: None,
        }
    }

    /// Sets the namespace (builder pattern); an empty value stays absent
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = if namespace.is_empty() {
            None
        } else {
            Some(namespace)
        };
        self
    }

    /// Key used to deduplicate and reconcile identities
    pub fn identity_key(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}{}{}", self.component, KEY_SEPARATOR, ns),
            None => self.component.clone(),
        }
    }

    /// Rebuilds a dependency from a key produced by [`identity_key`](Self::identity_key)
    pub fn from_identity_key(key: &str) -> Self {
        match key.split_once(KEY_SEPARATOR) {
            Some((component, ns)) => Self::new(component).with_namespace(ns),
            None => Self::new(key),
        }
    }

    /// Persisted identity fields for a platform arity
    ///
    /// With an arity of 2 the namespace slot is always written, using the
    /// `None` marker when absent, so line shapes stay fixed per platform.
    pub fn fields(&self, arity: usize) -> Vec<String> {
        let mut fields = vec![self.component.clone()];
        if arity > 1 {
            fields.push(
                self.namespace
                    .clone()
                    .unwrap_or_else(|| NONE_MARKER.to_string()),
            );
        }
        fields
    }

    /// Reads an identity back from persisted fields
    pub fn from_fields(fields: &[&str], arity: usize) -> Option<Self> {
        let component = fields.first()?.trim();
        if component.is_empty() || component == NONE_MARKER {
            return None;
        }
        let dependency = Self::new(component);
        if arity > 1 {
            match fields.get(1).map(|s| s.trim()) {
                Some(ns) if ns != NONE_MARKER => return Some(dependency.with_namespace(ns)),
                _ => {}
            }
        }
        Some(dependency)
    }
}

impl fmt::Display for ManifestDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{} ({})", self.component, ns),
            None => write!(f, "{}", self.component),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_namespace_is_absent() {
        let dep = ManifestDependency::new("appcompat").with_namespace("");
        assert_eq!(dep.namespace, None);
    }

    #[test]
    fn test_identity_key_roundtrip() {
        let dep = ManifestDependency::new("appcompat").with_namespace("androidx/appcompat");
        let back = ManifestDependency::from_identity_key(&dep.identity_key());
        assert_eq!(back, dep);

        let plain = ManifestDependency::new("serde");
        assert_eq!(plain.identity_key(), "serde");
    }

    #[test]
    fn test_fields_with_none_marker() {
        let dep = ManifestDependency::new("c_a");
        assert_eq!(dep.fields(2), vec!["c_a", "None"]);
        assert_eq!(dep.fields(1), vec!["c_a"]);
    }

    #[test]
    fn test_from_fields() {
        let dep = ManifestDependency::from_fields(&["c_a", "ns_a"], 2).unwrap();
        assert_eq!(dep.namespace.as_deref(), Some("ns_a"));

        let dep = ManifestDependency::from_fields(&["c_a", "None"], 2).unwrap();
        assert_eq!(dep.namespace, None);

        let dep = ManifestDependency::from_fields(&["lodash", "MIT"], 1).unwrap();
        assert_eq!(dep, ManifestDependency::new("lodash"));

        assert!(ManifestDependency::from_fields(&[], 1).is_none());
        assert!(ManifestDependency::from_fields(&["None"], 1).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ManifestDependency::new("http")), "http");
        assert_eq!(
            format!("{}", ManifestDependency::new("c").with_namespace("n")),
            "c (n)"
        );
    }

    #[test]
    fn test_ordering_by_component_first() {
        let mut deps = vec![
            ManifestDependency::new("b"),
            ManifestDependency::new("a").with_namespace("z"),
        ];
        deps.sort();
        assert_eq!(deps[0].component, "a");
    }
}
