//! In-memory tag cache with LRU eviction.
//!
//! Thread-safe cache using `Arc<RwLock<LruCache>>` with TTL support
//! and lazy expiration (entries are cleaned up on access). Alongside
//! the store it keeps a tag index mapping each tag to the keys that
//! carry it, so invalidating a tag drops all derived entries without
//! scanning the whole cache.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tapeo_core::cache::{Result, TagCache};
use tokio::sync::RwLock;

/// A single cache entry with its tags and optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    tags: Vec<String>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, tags: &[String], ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self {
            value,
            tags: tags.to_vec(),
            expires_at,
        }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory [`TagCache`] with LRU eviction.
///
/// Keys evicted by the LRU policy linger in the tag index until their
/// tag is next invalidated; invalidation tolerates keys that are
/// already gone.
#[derive(Debug, Clone)]
pub struct MemoryTagCache {
    /// Main key-value store with LRU eviction.
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    /// Maps tag -> set of keys carrying it.
    tags: Arc<RwLock<HashMap<String, HashSet<String>>>>,
}

impl MemoryTagCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            tags: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl TagCache for MemoryTagCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        match store.get(key) {
            // Lazy expiry: the entry stays until eviction or
            // invalidation, it just stops being served.
            Some(entry) if entry.is_expired() => Ok(None),
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], tags: &[String], ttl: Option<Duration>) -> Result<()> {
        {
            let mut store = self.store.write().await;
            let entry = CacheEntry::new(value.to_vec(), tags, ttl);
            store.put(key.to_string(), entry);
        }

        if !tags.is_empty() {
            let mut index = self.tags.write().await;
            for tag in tags {
                index.entry(tag.clone()).or_default().insert(key.to_string());
            }
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let removed = {
            let mut store = self.store.write().await;
            store.pop(key)
        };

        if let Some(entry) = removed {
            let mut index = self.tags.write().await;
            for tag in &entry.tags {
                if let Some(keys) = index.get_mut(tag) {
                    keys.remove(key);
                    if keys.is_empty() {
                        index.remove(tag);
                    }
                }
            }
        }

        Ok(())
    }

    async fn invalidate_tag(&self, tag: &str) -> Result<()> {
        let keys = {
            let mut index = self.tags.write().await;
            index.remove(tag).unwrap_or_default()
        };

        if keys.is_empty() {
            return Ok(());
        }

        let mut store = self.store.write().await;
        for key in &keys {
            store.pop(key);
        }

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.store.write().await.clear();
        self.tags.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn set_and_get_round_trip() {
        let cache = MemoryTagCache::new(10);
        cache.set("k1", b"hola", &[], None).await.unwrap();

        assert_eq!(cache.get("k1").await.unwrap(), Some(b"hola".to_vec()));
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_entries_are_not_served() {
        let cache = MemoryTagCache::new(10);
        cache
            .set("k1", b"hola", &[], Some(Duration::from_millis(30)))
            .await
            .unwrap();

        assert!(cache.get("k1").await.unwrap().is_some());
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get("k1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalidate_tag_drops_only_tagged_entries() {
        let cache = MemoryTagCache::new(10);
        cache
            .set("venues", b"[]", &tags(&["kind:venue"]), None)
            .await
            .unwrap();
        cache
            .set("stamps", b"[]", &tags(&["kind:venue", "sitemap"]), None)
            .await
            .unwrap();
        cache
            .set("guides", b"[]", &tags(&["kind:guide"]), None)
            .await
            .unwrap();

        cache.invalidate_tag("kind:venue").await.unwrap();

        assert_eq!(cache.get("venues").await.unwrap(), None);
        assert_eq!(cache.get("stamps").await.unwrap(), None);
        assert!(cache.get("guides").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn invalidating_an_unknown_tag_is_a_no_op() {
        let cache = MemoryTagCache::new(10);
        cache.invalidate_tag("kind:city").await.unwrap();
    }

    #[tokio::test]
    async fn remove_cleans_the_tag_index() {
        let cache = MemoryTagCache::new(10);
        cache
            .set("k1", b"hola", &tags(&["kind:city"]), None)
            .await
            .unwrap();

        cache.remove("k1").await.unwrap();
        assert_eq!(cache.get("k1").await.unwrap(), None);

        // The index entry is gone too, so the tag invalidates cleanly.
        cache.invalidate_tag("kind:city").await.unwrap();
    }

    #[tokio::test]
    async fn lru_evicts_the_oldest_entry() {
        let cache = MemoryTagCache::new(2);
        cache.set("k1", b"1", &[], None).await.unwrap();
        cache.set("k2", b"2", &[], None).await.unwrap();
        cache.set("k3", b"3", &[], None).await.unwrap();

        assert_eq!(cache.get("k1").await.unwrap(), None);
        assert!(cache.get("k2").await.unwrap().is_some());
        assert!(cache.get("k3").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = MemoryTagCache::new(10);
        cache
            .set("k1", b"1", &tags(&["kind:city"]), None)
            .await
            .unwrap();
        cache.clear().await.unwrap();

        assert_eq!(cache.get("k1").await.unwrap(), None);
    }

    #[test]
    #[should_panic(expected = "max_entries must be > 0")]
    fn zero_capacity_panics() {
        MemoryTagCache::new(0);
    }
}
