//! Deduplication of dependency identities
//!
//! Identities are joined into a key, collected into an ordered set and
//! split back, which yields a canonical ascending order. Applying it twice
//! is a no-op.

use crate::domain::ManifestDependency;
use std::collections::BTreeSet;

/// Collapses repeated identities and sorts them by identity key
pub fn deduplicate<I>(dependencies: I) -> Vec<ManifestDependency>
where
    I: IntoIterator<Item = ManifestDependency>,
{
    dependencies
        .into_iter()
        .map(|d| d.identity_key())
        .collect::<BTreeSet<_>>()
        .iter()
        .map(|key| ManifestDependency::from_identity_key(key))
        .collect()
}
