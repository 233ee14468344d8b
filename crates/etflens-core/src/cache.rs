//! In-memory TTL cache for provider responses.
//!
//! Entries record when they were stored; a `get` only returns the payload
//! while `now - stored_at < ttl`. Expired entries behave as absent but are
//! not physically evicted until a `put` overwrites them (lazy expiry).
//! There is no capacity bound, so entries accumulate for the process
//! lifetime. The store is owned by the service instance, never ambient
//! global state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default time-to-live: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3_600);

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    stored_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl CacheInner {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).and_then(|entry| {
            if entry.stored_at.elapsed() < self.ttl {
                Some(entry.body.clone())
            } else {
                None
            }
        })
    }

    fn put(&mut self, key: String, body: String) {
        self.map.insert(
            key,
            CacheEntry {
                body,
                stored_at: Instant::now(),
            },
        );
    }
}

/// Thread-safe response cache keyed by symbol + output-size composite.
///
/// The read-check-then-write sequence around a cache miss in the service
/// is not atomic; two concurrent callers for the same key may both miss
/// and both fetch. That duplication is tolerated; there is no
/// single-flight de-duplication.
#[derive(Debug, Clone)]
pub struct CacheStore {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner {
                map: HashMap::new(),
                ttl,
            })),
        }
    }

    /// Cache with the standard one-hour TTL.
    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL)
    }

    /// Stored payload for `key`, if present and not expired.
    ///
    /// A never-stored key and an expired one are indistinguishable here.
    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.inner.read().await;
        store.get(key)
    }

    /// Store `body` under `key`, overwriting unconditionally and
    /// resetting the entry's stored-at instant.
    pub async fn put(&self, key: String, body: String) {
        let mut store = self.inner.write().await;
        store.put(key, body);
    }

    /// Number of entries, expired ones included.
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_after_put_returns_the_payload() {
        let cache = CacheStore::new(Duration::from_secs(60));

        assert!(cache.get("GLD-full").await.is_none());

        cache
            .put(String::from("GLD-full"), String::from("payload"))
            .await;
        assert_eq!(cache.get("GLD-full").await.as_deref(), Some("payload"));
    }

    #[tokio::test]
    async fn put_overwrites_unconditionally() {
        let cache = CacheStore::new(Duration::from_secs(60));

        cache
            .put(String::from("GLD-full"), String::from("stale"))
            .await;
        cache
            .put(String::from("GLD-full"), String::from("fresh"))
            .await;

        assert_eq!(cache.get("GLD-full").await.as_deref(), Some("fresh"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn expired_entry_behaves_as_absent_but_is_not_evicted() {
        let cache = CacheStore::new(Duration::from_millis(50));

        cache
            .put(String::from("IBIT-full"), String::from("payload"))
            .await;
        assert!(cache.get("IBIT-full").await.is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(cache.get("IBIT-full").await.is_none());
        // Lazy expiry: the entry still occupies a slot until overwritten.
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn overwrite_refreshes_the_stored_at_instant() {
        let cache = CacheStore::new(Duration::from_millis(200));

        cache
            .put(String::from("GLD-compact"), String::from("first"))
            .await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        cache
            .put(String::from("GLD-compact"), String::from("second"))
            .await;
        tokio::time::sleep(Duration::from_millis(120)).await;

        // 240ms after the first put, but only 120ms after the overwrite.
        assert_eq!(cache.get("GLD-compact").await.as_deref(), Some("second"));
    }
}
