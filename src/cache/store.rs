//! In-memory cache for catalog API responses
//!
//! Provides a `MemoryCache` that stores serializable data as JSON values with
//! capture timestamps, supporting graceful degradation when the catalog API
//! is unavailable. Entries older than the TTL are deleted lazily on read.

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Default time-to-live for cache entries in minutes
const DEFAULT_TTL_MINUTES: i64 = 60;

/// Wrapper for a single cached value
#[derive(Debug)]
struct CacheEntry {
    /// The cached data, kept as JSON so one cache can hold any shape
    value: serde_json::Value,
    /// When the data was cached
    cached_at: DateTime<Utc>,
}

/// An in-memory map from string keys to timestamped values
///
/// The cache is an explicitly constructed instance handed to whoever needs it,
/// not process-wide state, so tests can run against isolated caches. There is
/// no size bound and no persistence.
#[derive(Debug)]
pub struct MemoryCache {
    /// How long an entry stays fresh
    ttl: Duration,
    /// Keyed entries behind a mutex so the cache can be shared across tasks
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    /// Creates a cache with the default one-hour TTL
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    /// Creates a cache with a custom TTL
    ///
    /// Useful for testing expiry without waiting an hour.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Reads a value from the cache
    ///
    /// Returns `None` if the key is absent, the entry has outlived the TTL, or
    /// the stored value does not decode as `T`. An expired entry is removed
    /// before returning, so it no longer occupies storage.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().ok()?;

        let expired = {
            let entry = entries.get(key)?;
            Utc::now() - entry.cached_at > self.ttl
        };

        if expired {
            entries.remove(key);
            return None;
        }

        let entry = entries.get(key)?;
        serde_json::from_value(entry.value.clone()).ok()
    }

    /// Writes a value to the cache under the given key
    ///
    /// Overwrites any existing entry. A value that fails to serialize is
    /// silently skipped; the next read simply misses.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let Ok(value) = serde_json::to_value(value) else {
            return;
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    cached_at: Utc::now(),
                },
            );
        }
    }

    /// Returns whether the key currently occupies storage, without evicting
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    /// Number of entries currently in storage, expired or not
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
