//! Rotating API key supply for the catalog endpoint
//!
//! The catalog enforces per-key quotas, so requests cycle through a small pool
//! of keys round-robin. The pool may be empty; the catalog also answers
//! keyless requests at a lower quota.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Environment variable holding a comma-separated list of API keys
const API_KEYS_ENV: &str = "BOOKSCOUT_API_KEYS";

/// Round-robin provider of catalog API keys
#[derive(Debug, Default)]
pub struct ApiKeyRing {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl ApiKeyRing {
    /// Creates a ring over the given keys
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Creates a ring from the `BOOKSCOUT_API_KEYS` environment variable
    ///
    /// Blank entries are skipped; an unset variable yields an empty ring.
    pub fn from_env() -> Self {
        let keys = std::env::var(API_KEYS_ENV)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(keys)
    }

    /// Returns the next key in rotation, or `None` when the ring is empty
    pub fn next_key(&self) -> Option<String> {
        if self.keys.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        Some(self.keys[index].clone())
    }

    /// Returns whether the ring holds no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
