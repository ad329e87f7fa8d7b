//! TTL Cache
//!
//! In-memory key→value store with per-entry time-to-live. Eviction is lazy:
//! an expired entry is removed on the read that observes its expiry; there
//! is no background sweeper. The key space is bounded by query fingerprints
//! (`price:{id}`, `trending:{n}`, `movers:{kind}`, `news:all`), so there is
//! no size-based eviction.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

struct Entry<V> {
    value: V,
    stored_at: Instant,
    ttl: Duration,
}

impl<V> Entry<V> {
    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) >= self.ttl
    }
}

/// Shared TTL cache. Mutex-guarded: the runtime is multi-threaded.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Store a value, overwriting unconditionally and resetting the TTL clock.
    pub fn insert(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        if let Ok(mut entries) = self.entries.lock() {
            tracing::debug!(key = %key, ttl_secs = ttl.as_secs(), "cache set");
            entries.insert(
                key,
                Entry {
                    value,
                    stored_at: Instant::now(),
                    ttl,
                },
            );
        }
    }

    /// Remove a single key
    pub fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Number of stored entries, expired or not
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> TtlCache<V> {
    /// Get a value. Returns `None` for keys never stored and for expired
    /// entries; in the expired case the entry is removed as a side effect.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().ok()?;
        let now = Instant::now();

        match entries.get(key) {
            Some(entry) if entry.expired(now) => {
                entries.remove(key);
                tracing::debug!(key, "cache expired");
                None
            }
            Some(entry) => {
                tracing::debug!(key, "cache hit");
                Some(entry.value.clone())
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_set_then_get() {
        let cache = TtlCache::new();
        cache.insert("price:bitcoin", 42u32, Duration::from_secs(120));
        assert_eq!(cache.get("price:bitcoin"), Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_key() {
        let cache: TtlCache<u32> = TtlCache::new();
        assert_eq!(cache.get("price:unknown"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_evicts_and_reset_restores() {
        let cache = TtlCache::new();
        cache.insert("k", "v".to_string(), Duration::from_secs(10));

        advance(Duration::from_secs(10)).await;
        assert_eq!(cache.get("k"), None);
        // expired read evicted the entry
        assert_eq!(cache.len(), 0);

        // a fresh set makes it readable again
        cache.insert("k", "v2".to_string(), Duration::from_secs(10));
        assert_eq!(cache.get("k"), Some("v2".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_ttl() {
        let cache = TtlCache::new();
        cache.insert("k", 1u32, Duration::from_secs(10));

        advance(Duration::from_secs(8)).await;
        cache.insert("k", 2u32, Duration::from_secs(10));

        // original entry would have expired here; the overwrite restarted
        // the clock
        advance(Duration::from_secs(8)).await;
        assert_eq!(cache.get("k"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_and_clear() {
        let cache = TtlCache::new();
        cache.insert("a", 1u32, Duration::from_secs(60));
        cache.insert("b", 2u32, Duration::from_secs(60));

        cache.remove("a");
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));

        cache.clear();
        assert!(cache.is_empty());
    }
}
