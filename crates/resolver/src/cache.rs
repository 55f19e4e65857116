//! Process-lifetime cache of resolved result-space environments

use resultspace_core::Environment;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A resolved environment together with the hook fingerprints that produced it
#[derive(Debug, Clone)]
struct CachedEnvironment {
    env: Environment,
    fingerprints: Vec<String>,
}

/// Keyed store mapping a result-space path to its last resolved environment
///
/// Entries live for the lifetime of the cache; there is no eviction and no
/// explicit invalidation. Staleness is detected by comparing the hook
/// fingerprints captured at store time with the current ones at lookup time.
/// Mutation requires `&mut`; concurrent callers need external
/// synchronization.
#[derive(Debug, Default)]
pub struct EnvCache {
    entries: HashMap<PathBuf, CachedEnvironment>,
}

impl EnvCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of the cached environment for `path` when the stored
    /// fingerprint sequence is list-equal to `fingerprints`.
    ///
    /// A fingerprint mismatch is indistinguishable from an absent entry.
    pub fn lookup(&self, path: &Path, fingerprints: &[String]) -> Option<Environment> {
        self.entries
            .get(path)
            .filter(|cached| cached.fingerprints == fingerprints)
            .map(|cached| cached.env.clone())
    }

    /// Insert or overwrite the entry for `path`
    pub fn store(&mut self, path: &Path, env: Environment, fingerprints: Vec<String>) {
        self.entries
            .insert(path.to_path_buf(), CachedEnvironment { env, fingerprints });
    }

    /// Number of cached result spaces
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
