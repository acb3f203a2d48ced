//! Process-wide version key for cache busting.
//!
//! The key is a wall-clock timestamp, lazily created on first use and
//! kept in an externally supplied cache store with no expiry. It only
//! needs to *change* when cache busting is desired, which happens via
//! external invalidation (clearing the store), never via this module.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;

use crate::debug;

/// Cache key under which the version key is stored.
pub const VERSION_CACHE_KEY: &str = "mergestamp_versionkey";

/// Shared cache store seam.
///
/// The pipeline only ever stores one entry (the version key), but the
/// contract mirrors a general tagged cache so a host application's
/// cache layer can be plugged in directly.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str, tags: &[&str], ttl: Option<Duration>);
}

/// Lazily produces and memoizes the version key in the shared store.
pub struct VersionKeyCache {
    store: Arc<dyn CacheStore>,
}

impl VersionKeyCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Get the current version key, generating and storing one if the
    /// shared store holds none.
    ///
    /// No locking: concurrent first-callers may each generate and write
    /// a timestamp, last write wins. No correctness property depends on
    /// a single globally-unique value.
    pub fn get(&self) -> u64 {
        if let Some(stored) = self.store.get(VERSION_CACHE_KEY) {
            if let Ok(key) = stored.parse() {
                return key;
            }
        }

        let key = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.store.set(VERSION_CACHE_KEY, &key.to_string(), &[], None);
        debug!("version"; "generated new version key {key}");
        key
    }
}

/// In-process `CacheStore` backed by a concurrent map.
///
/// Tags and TTL are accepted but ignored; invalidation happens through
/// `clear()`.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, String>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all entries. The next `VersionKeyCache::get` generates a
    /// fresh key.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.clone())
    }

    fn set(&self, key: &str, value: &str, _tags: &[&str], _ttl: Option<Duration>) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}
