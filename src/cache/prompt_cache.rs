//! Completion response cache keyed by verbatim prompt text.
//!
//! Exact-string keying is contractual: "pizza", "Pizza" and "pizza please"
//! are three different entries. Entries expire after a fixed TTL measured
//! from insertion and the cache lives only as long as the process.

use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;

/// A single cached completion.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The completion text.
    response: String,
    /// Unix timestamp when the entry was created.
    created_at: u64,
}

/// In-memory prompt cache with TTL expiry.
pub struct PromptCache {
    entries: DashMap<String, CacheEntry>,
    ttl_secs: u64,
}

impl PromptCache {
    /// Create a cache whose entries expire `ttl_secs` after insertion.
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl_secs,
        }
    }

    /// Look up a cached response. Returns `None` if the key is absent or
    /// expired; expired entries are removed on sight.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = Self::now_secs();
        let expired = self
            .entries
            .get(key)
            .map(|entry| now.saturating_sub(entry.created_at) > self.ttl_secs)?;
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.response.clone())
    }

    /// Store a response under the verbatim prompt key.
    pub fn set(&self, key: String, response: String) {
        self.entries.insert(
            key,
            CacheEntry {
                response,
                created_at: Self::now_secs(),
            },
        );
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let now = Self::now_secs();
        let ttl = self.ttl_secs;
        self.entries
            .retain(|_, entry| now.saturating_sub(entry.created_at) <= ttl);
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    /// Backdate an entry's creation time. Test hook for exercising expiry
    /// without sleeping.
    #[cfg(test)]
    fn backdate(&self, key: &str, secs: u64) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.created_at -= secs;
        }
    }
}
