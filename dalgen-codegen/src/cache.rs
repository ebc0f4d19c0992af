//! Incremental generation cache.
//!
//! Pure memoization keyed by content hash: resolved descriptors are
//! identified by their fully scoped name and fingerprinted over every field
//! that influences emitted text. Entries survive across passes so unchanged
//! descriptors skip re-analysis and re-emission entirely. The map supports
//! concurrent readers with exclusive writes, so callers may process
//! descriptors on a worker pool.

use std::{
    collections::HashSet,
    hash::{Hash, Hasher},
    sync::RwLock,
};

use dalgen_descriptor::CommandDescriptor;
use indexmap::IndexMap;
use serde::Serialize;
use xxhash_rust::xxh3::Xxh3;

use crate::{diagnostic::Diagnostic, emit::GeneratedArtifact};

/// How a descriptor relates to the previous pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CacheStatus {
    /// Cache key matched; prior artifacts were reused.
    Unchanged,
    /// Cache key differed (or the descriptor is new); output was rebuilt.
    Modified,
    /// Present in the prior pass, absent now; entry deleted.
    Removed,
}

/// Fingerprint the output-relevant fields of a resolved descriptor.
///
/// The resolved naming convention and parameter prefix are deliberately
/// excluded: they are already baked into the resolved parameter names, so
/// hashing them would treat cosmetic input changes as output changes.
pub fn cache_key(descriptor: &CommandDescriptor) -> u64 {
    let mut hasher = Xxh3::new();
    descriptor.name.hash(&mut hasher);
    descriptor.scopes.hash(&mut hasher);
    descriptor.sources.hash(&mut hasher);
    descriptor.non_query.hash(&mut hasher);
    descriptor.data_source_key.hash(&mut hasher);
    descriptor.parameters.hash(&mut hasher);
    descriptor.result.hash(&mut hasher);
    descriptor.passthrough.hash(&mut hasher);
    hasher.finish()
}

struct CacheEntry {
    key: u64,
    artifacts: Vec<GeneratedArtifact>,
    diagnostics: Vec<Diagnostic>,
}

/// Map from descriptor identity to its last generation result.
#[derive(Default)]
pub struct GenerationCache {
    entries: RwLock<IndexMap<String, CacheEntry>>,
}

impl GenerationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a descriptor by identity and key. Returns the stored
    /// artifacts and diagnostics when the key matches, `None` otherwise.
    pub fn lookup(
        &self,
        identity: &str,
        key: u64,
    ) -> Option<(Vec<GeneratedArtifact>, Vec<Diagnostic>)> {
        let entries = self.entries.read().expect("cache lock poisoned");
        let entry = entries.get(identity)?;
        if entry.key == key {
            Some((entry.artifacts.clone(), entry.diagnostics.clone()))
        } else {
            None
        }
    }

    /// Store (or replace) the generation result for a descriptor.
    pub fn store(
        &self,
        identity: String,
        key: u64,
        artifacts: Vec<GeneratedArtifact>,
        diagnostics: Vec<Diagnostic>,
    ) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.insert(
            identity,
            CacheEntry {
                key,
                artifacts,
                diagnostics,
            },
        );
    }

    /// Delete entries whose identity is absent from the current pass and
    /// return their identities in insertion order.
    pub fn evict_absent(&self, seen: &HashSet<String>) -> Vec<String> {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        let removed: Vec<String> = entries
            .keys()
            .filter(|identity| !seen.contains(*identity))
            .cloned()
            .collect();
        entries.retain(|identity, _| seen.contains(identity));
        removed
    }

    /// Number of cached descriptors.
    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use dalgen_descriptor::{ProjectConfig, RawCommandDescriptor, RawParameter, resolve};

    use super::*;

    fn descriptor(raw: RawCommandDescriptor) -> CommandDescriptor {
        resolve(&raw, &ProjectConfig::new())
    }

    #[test]
    fn test_cache_key_is_deterministic() {
        let a = descriptor(RawCommandDescriptor::new("CreateUser").procedure("create_user"));
        let b = descriptor(RawCommandDescriptor::new("CreateUser").procedure("create_user"));
        assert_eq!(cache_key(&a), cache_key(&b));
    }

    #[test]
    fn test_cache_key_tracks_output_relevant_fields() {
        let base = descriptor(RawCommandDescriptor::new("CreateUser").procedure("create_user"));
        let renamed = descriptor(RawCommandDescriptor::new("CreateUser").procedure("create_other"));
        assert_ne!(cache_key(&base), cache_key(&renamed));

        let keyed = descriptor(
            RawCommandDescriptor::new("CreateUser")
                .procedure("create_user")
                .data_source_key("analytics"),
        );
        assert_ne!(cache_key(&base), cache_key(&keyed));
    }

    #[test]
    fn test_cosmetic_input_changes_do_not_move_the_key() {
        // Explicit snake names and convention-derived snake names resolve
        // to the same parameter names, hence the same output text.
        let explicit = descriptor(
            RawCommandDescriptor::new("CreateUser")
                .procedure("create_user")
                .parameter(RawParameter::new("user_id")),
        );
        let via_convention = resolve(
            &RawCommandDescriptor::new("CreateUser")
                .procedure("create_user")
                .parameter(RawParameter::new("user_id")),
            &ProjectConfig::new()
                .naming_convention(dalgen_descriptor::NamingConvention::SnakeCase),
        );
        assert_eq!(cache_key(&explicit), cache_key(&via_convention));
    }

    #[test]
    fn test_lookup_miss_on_key_change() {
        let cache = GenerationCache::new();
        cache.store("CreateUser".to_string(), 1, Vec::new(), Vec::new());
        assert!(cache.lookup("CreateUser", 1).is_some());
        assert!(cache.lookup("CreateUser", 2).is_none());
        assert!(cache.lookup("Other", 1).is_none());
    }

    #[test]
    fn test_evict_absent() {
        let cache = GenerationCache::new();
        cache.store("A".to_string(), 1, Vec::new(), Vec::new());
        cache.store("B".to_string(), 2, Vec::new(), Vec::new());

        let seen: HashSet<String> = [String::from("B")].into();
        let removed = cache.evict_absent(&seen);
        assert_eq!(removed, vec!["A".to_string()]);
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup("B", 2).is_some());
    }
}
