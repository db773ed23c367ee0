use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// A byte cache with tag-based invalidation.
///
/// Every entry is stored under a key and associated with zero or more
/// tags. Invalidating a tag drops all entries carrying it, which is how
/// content mutations flush the derived read paths (lists, pages,
/// sitemaps) without enumerating keys.
#[async_trait]
pub trait TagCache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value with its invalidation tags and an optional TTL.
    async fn set(
        &self,
        key: &str,
        value: &[u8],
        tags: &[String],
        ttl: Option<Duration>,
    ) -> Result<()>;

    /// Removes a single entry by key.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Drops every entry tagged with `tag`.
    async fn invalidate_tag(&self, tag: &str) -> Result<()>;

    /// Drops everything.
    async fn clear(&self) -> Result<()>;
}
