//! Cached content store decorator.
//!
//! Wraps a [`ContentStore`] with the cache-aside pattern:
//! - **Reads**: check cache first, on miss fetch from the store and
//!   populate the cache, tagging each entry with the kinds it derives
//!   from.
//! - **Writes**: persist to the store, then invalidate the tags of the
//!   mutated kind (plus the homepage and sitemap groups where those
//!   pages depend on it).
//!
//! QR codes and feedback are deliberately not cached: scan-time
//! validity depends on `current_uses`, so those reads always hit the
//! store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tapeo_core::{
    cache::{
        categories_key, category_slug_key, cities_key, city_slug_key, doc_key, featured_key,
        from_cache_bytes, guide_slug_key, guides_key, kind_tag, recent_reviews_key,
        review_slug_key, reviews_key, sections_key, stamps_key, to_cache_bytes, venue_slug_key,
        venues_key, TagCache, HOMEPAGE_TAG, SITEMAP_TAG,
    },
    content::{Category, City, ContentKind, FeaturedItem, Guide, HomepageSection, Review, Venue},
    qr::{FeedbackStatus, QrCode, QrFeedback},
    storage::{
        CategoryRepository, CityRepository, ContentStore, CurationRepository, GuideRepository,
        GuideStamp, QrRepository, Result, ReviewRepository, ReviewStamp, VenueRepository,
        VenueStamp,
    },
};
use uuid::Uuid;

/// Cache-aside decorator over a content store.
///
/// # Type Parameters
///
/// * `R` - The underlying content store
/// * `C` - The cache implementation
pub struct CachedContentStore<R, C>
where
    R: ContentStore,
    C: TagCache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedContentStore<R, C>
where
    R: ContentStore,
    C: TagCache,
{
    /// Creates a new cached content store.
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    /// Cache-aside read: serve from cache, on miss fetch and populate.
    ///
    /// `None` results are cached too; the negative entry is dropped by
    /// the same tag invalidation that a later create triggers.
    async fn read_through<T>(
        &self,
        key: String,
        tags: Vec<String>,
        fetch: impl Future<Output = Result<T>> + Send,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send,
    {
        if let Ok(Some(bytes)) = self.cache.get(&key).await {
            if let Ok(value) = from_cache_bytes(&bytes) {
                tracing::trace!(key = %key, "Cache hit");
                return Ok(value);
            }
            // Deserialization failed - treat as cache miss
            tracing::warn!(key = %key, "Cache deserialization failed");
        }

        tracing::trace!(key = %key, "Cache miss");
        let value = fetch.await?;

        if let Ok(bytes) = to_cache_bytes(&value) {
            if let Err(err) = self.cache.set(&key, &bytes, &tags, Some(self.ttl)).await {
                tracing::warn!(key = %key, error = %err, "Failed to populate cache");
            }
        }

        Ok(value)
    }

    /// Invalidates the tag of the mutated kind plus any group tags.
    async fn flush(&self, kind: ContentKind, extra: &[&str]) {
        let mut tags = vec![kind_tag(kind)];
        tags.extend(extra.iter().map(|tag| tag.to_string()));

        for tag in &tags {
            if let Err(err) = self.cache.invalidate_tag(tag).await {
                tracing::warn!(tag = %tag, error = %err, "Failed to invalidate cache tag");
            }
        }
    }
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[async_trait]
impl<R, C> CityRepository for CachedContentStore<R, C>
where
    R: ContentStore + 'static,
    C: TagCache + 'static,
{
    async fn list_cities(&self) -> Result<Vec<City>> {
        self.read_through(
            cities_key(),
            vec![kind_tag(ContentKind::City)],
            self.repository.list_cities(),
        )
        .await
    }

    async fn get_city(&self, id: Uuid) -> Result<Option<City>> {
        self.read_through(
            doc_key(ContentKind::City, id),
            vec![kind_tag(ContentKind::City)],
            self.repository.get_city(id),
        )
        .await
    }

    async fn find_city_by_slug(&self, slug: &str) -> Result<Option<City>> {
        self.read_through(
            city_slug_key(slug),
            vec![kind_tag(ContentKind::City)],
            self.repository.find_city_by_slug(slug),
        )
        .await
    }

    async fn create_city(&self, city: &City) -> Result<()> {
        self.repository.create_city(city).await?;
        self.flush(ContentKind::City, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(city_id = %city.id, slug = %city.slug, "City created");
        Ok(())
    }

    async fn update_city(&self, city: &City) -> Result<()> {
        self.repository.update_city(city).await?;
        self.flush(ContentKind::City, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(city_id = %city.id, slug = %city.slug, "City updated");
        Ok(())
    }

    async fn delete_city(&self, id: Uuid) -> Result<()> {
        self.repository.delete_city(id).await?;
        self.flush(ContentKind::City, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(city_id = %id, "City deleted");
        Ok(())
    }

    async fn count_cities(&self) -> Result<u64> {
        self.repository.count_cities().await
    }
}

#[async_trait]
impl<R, C> VenueRepository for CachedContentStore<R, C>
where
    R: ContentStore + 'static,
    C: TagCache + 'static,
{
    async fn list_venues(&self, city_id: Option<Uuid>) -> Result<Vec<Venue>> {
        self.read_through(
            venues_key(city_id),
            vec![kind_tag(ContentKind::Venue)],
            self.repository.list_venues(city_id),
        )
        .await
    }

    async fn get_venue(&self, id: Uuid) -> Result<Option<Venue>> {
        self.read_through(
            doc_key(ContentKind::Venue, id),
            vec![kind_tag(ContentKind::Venue)],
            self.repository.get_venue(id),
        )
        .await
    }

    async fn find_venue_by_slug(&self, city_id: Uuid, slug: &str) -> Result<Option<Venue>> {
        self.read_through(
            venue_slug_key(city_id, slug),
            vec![kind_tag(ContentKind::Venue)],
            self.repository.find_venue_by_slug(city_id, slug),
        )
        .await
    }

    async fn create_venue(&self, venue: &Venue) -> Result<()> {
        self.repository.create_venue(venue).await?;
        self.flush(ContentKind::Venue, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(venue_id = %venue.id, slug = %venue.slug, "Venue created");
        Ok(())
    }

    async fn update_venue(&self, venue: &Venue) -> Result<()> {
        self.repository.update_venue(venue).await?;
        self.flush(ContentKind::Venue, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(venue_id = %venue.id, slug = %venue.slug, "Venue updated");
        Ok(())
    }

    async fn delete_venue(&self, id: Uuid) -> Result<()> {
        self.repository.delete_venue(id).await?;
        self.flush(ContentKind::Venue, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(venue_id = %id, "Venue deleted");
        Ok(())
    }

    async fn count_venues(&self) -> Result<u64> {
        self.repository.count_venues().await
    }

    async fn count_venues_in_city(&self, city_id: Uuid) -> Result<u64> {
        self.repository.count_venues_in_city(city_id).await
    }

    async fn count_venues_with_category(&self, category_id: Uuid) -> Result<u64> {
        self.repository.count_venues_with_category(category_id).await
    }

    async fn venue_stamps(&self) -> Result<Vec<VenueStamp>> {
        // Stamps join venue and city slugs, so they carry both kind
        // tags and fall out when either side changes.
        let mut entry_tags = tags(&[SITEMAP_TAG]);
        entry_tags.push(kind_tag(ContentKind::Venue));
        entry_tags.push(kind_tag(ContentKind::City));
        self.read_through(
            stamps_key(ContentKind::Venue),
            entry_tags,
            self.repository.venue_stamps(),
        )
        .await
    }
}

#[async_trait]
impl<R, C> ReviewRepository for CachedContentStore<R, C>
where
    R: ContentStore + 'static,
    C: TagCache + 'static,
{
    async fn list_reviews(&self, venue_id: Option<Uuid>) -> Result<Vec<Review>> {
        self.read_through(
            reviews_key(venue_id),
            vec![kind_tag(ContentKind::Review)],
            self.repository.list_reviews(venue_id),
        )
        .await
    }

    async fn list_recent_reviews(&self, limit: u32) -> Result<Vec<Review>> {
        let mut entry_tags = tags(&[HOMEPAGE_TAG]);
        entry_tags.push(kind_tag(ContentKind::Review));
        self.read_through(
            recent_reviews_key(limit),
            entry_tags,
            self.repository.list_recent_reviews(limit),
        )
        .await
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>> {
        self.read_through(
            doc_key(ContentKind::Review, id),
            vec![kind_tag(ContentKind::Review)],
            self.repository.get_review(id),
        )
        .await
    }

    async fn find_review_by_slug(&self, venue_id: Uuid, slug: &str) -> Result<Option<Review>> {
        self.read_through(
            review_slug_key(venue_id, slug),
            vec![kind_tag(ContentKind::Review)],
            self.repository.find_review_by_slug(venue_id, slug),
        )
        .await
    }

    async fn create_review(&self, review: &Review) -> Result<()> {
        self.repository.create_review(review).await?;
        self.flush(ContentKind::Review, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(review_id = %review.id, slug = %review.slug, "Review created");
        Ok(())
    }

    async fn update_review(&self, review: &Review) -> Result<()> {
        self.repository.update_review(review).await?;
        self.flush(ContentKind::Review, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(review_id = %review.id, slug = %review.slug, "Review updated");
        Ok(())
    }

    async fn delete_review(&self, id: Uuid) -> Result<()> {
        self.repository.delete_review(id).await?;
        self.flush(ContentKind::Review, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(review_id = %id, "Review deleted");
        Ok(())
    }

    async fn count_reviews(&self) -> Result<u64> {
        self.repository.count_reviews().await
    }

    async fn count_reviews_for_venue(&self, venue_id: Uuid) -> Result<u64> {
        self.repository.count_reviews_for_venue(venue_id).await
    }

    async fn review_stamps(&self) -> Result<Vec<ReviewStamp>> {
        let mut entry_tags = tags(&[SITEMAP_TAG]);
        entry_tags.push(kind_tag(ContentKind::Review));
        entry_tags.push(kind_tag(ContentKind::Venue));
        entry_tags.push(kind_tag(ContentKind::City));
        self.read_through(
            stamps_key(ContentKind::Review),
            entry_tags,
            self.repository.review_stamps(),
        )
        .await
    }
}

#[async_trait]
impl<R, C> CategoryRepository for CachedContentStore<R, C>
where
    R: ContentStore + 'static,
    C: TagCache + 'static,
{
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut entry_tags = tags(&[HOMEPAGE_TAG]);
        entry_tags.push(kind_tag(ContentKind::Category));
        self.read_through(
            categories_key(),
            entry_tags,
            self.repository.list_categories(),
        )
        .await
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<Category>> {
        self.read_through(
            doc_key(ContentKind::Category, id),
            vec![kind_tag(ContentKind::Category)],
            self.repository.get_category(id),
        )
        .await
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.read_through(
            category_slug_key(slug),
            vec![kind_tag(ContentKind::Category)],
            self.repository.find_category_by_slug(slug),
        )
        .await
    }

    async fn create_category(&self, category: &Category) -> Result<()> {
        self.repository.create_category(category).await?;
        self.flush(ContentKind::Category, &[HOMEPAGE_TAG]).await;
        tracing::debug!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(())
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        self.repository.update_category(category).await?;
        self.flush(ContentKind::Category, &[HOMEPAGE_TAG]).await;
        tracing::debug!(category_id = %category.id, slug = %category.slug, "Category updated");
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<()> {
        self.repository.delete_category(id).await?;
        self.flush(ContentKind::Category, &[HOMEPAGE_TAG]).await;
        tracing::debug!(category_id = %id, "Category deleted");
        Ok(())
    }

    async fn count_categories(&self) -> Result<u64> {
        self.repository.count_categories().await
    }
}

#[async_trait]
impl<R, C> GuideRepository for CachedContentStore<R, C>
where
    R: ContentStore + 'static,
    C: TagCache + 'static,
{
    async fn list_guides(&self) -> Result<Vec<Guide>> {
        self.read_through(
            guides_key(false),
            vec![kind_tag(ContentKind::Guide)],
            self.repository.list_guides(),
        )
        .await
    }

    async fn list_published_guides(&self) -> Result<Vec<Guide>> {
        let mut entry_tags = tags(&[HOMEPAGE_TAG]);
        entry_tags.push(kind_tag(ContentKind::Guide));
        self.read_through(
            guides_key(true),
            entry_tags,
            self.repository.list_published_guides(),
        )
        .await
    }

    async fn get_guide(&self, id: Uuid) -> Result<Option<Guide>> {
        self.read_through(
            doc_key(ContentKind::Guide, id),
            vec![kind_tag(ContentKind::Guide)],
            self.repository.get_guide(id),
        )
        .await
    }

    async fn find_guide_by_slug(&self, slug: &str) -> Result<Option<Guide>> {
        self.read_through(
            guide_slug_key(slug),
            vec![kind_tag(ContentKind::Guide)],
            self.repository.find_guide_by_slug(slug),
        )
        .await
    }

    async fn create_guide(&self, guide: &Guide) -> Result<()> {
        self.repository.create_guide(guide).await?;
        self.flush(ContentKind::Guide, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(guide_id = %guide.id, slug = %guide.slug, "Guide created");
        Ok(())
    }

    async fn update_guide(&self, guide: &Guide) -> Result<()> {
        self.repository.update_guide(guide).await?;
        self.flush(ContentKind::Guide, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(guide_id = %guide.id, slug = %guide.slug, "Guide updated");
        Ok(())
    }

    async fn delete_guide(&self, id: Uuid) -> Result<()> {
        self.repository.delete_guide(id).await?;
        self.flush(ContentKind::Guide, &[SITEMAP_TAG, HOMEPAGE_TAG])
            .await;
        tracing::debug!(guide_id = %id, "Guide deleted");
        Ok(())
    }

    async fn count_guides(&self) -> Result<u64> {
        self.repository.count_guides().await
    }

    async fn guide_stamps(&self) -> Result<Vec<GuideStamp>> {
        let mut entry_tags = tags(&[SITEMAP_TAG]);
        entry_tags.push(kind_tag(ContentKind::Guide));
        self.read_through(
            stamps_key(ContentKind::Guide),
            entry_tags,
            self.repository.guide_stamps(),
        )
        .await
    }
}

// QR codes and feedback bypass the cache entirely: use counting and
// validity checks need the current state on every scan.
#[async_trait]
impl<R, C> QrRepository for CachedContentStore<R, C>
where
    R: ContentStore + 'static,
    C: TagCache + 'static,
{
    async fn list_qr_codes(&self, venue_id: Option<Uuid>) -> Result<Vec<QrCode>> {
        self.repository.list_qr_codes(venue_id).await
    }

    async fn get_qr_code(&self, id: Uuid) -> Result<Option<QrCode>> {
        self.repository.get_qr_code(id).await
    }

    async fn find_qr_code(&self, code: &str) -> Result<Option<QrCode>> {
        self.repository.find_qr_code(code).await
    }

    async fn create_qr_code(&self, qr_code: &QrCode) -> Result<()> {
        self.repository.create_qr_code(qr_code).await?;
        tracing::debug!(qr_code_id = %qr_code.id, code = %qr_code.code, "QR code created");
        Ok(())
    }

    async fn update_qr_code(&self, qr_code: &QrCode) -> Result<()> {
        self.repository.update_qr_code(qr_code).await?;
        tracing::debug!(qr_code_id = %qr_code.id, code = %qr_code.code, "QR code updated");
        Ok(())
    }

    async fn delete_qr_code(&self, id: Uuid) -> Result<()> {
        self.repository.delete_qr_code(id).await?;
        tracing::debug!(qr_code_id = %id, "QR code deleted");
        Ok(())
    }

    async fn record_qr_use(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        self.repository.record_qr_use(id, at).await
    }

    async fn count_qr_codes_for_venue(&self, venue_id: Uuid) -> Result<u64> {
        self.repository.count_qr_codes_for_venue(venue_id).await
    }

    async fn create_feedback(&self, feedback: &QrFeedback) -> Result<()> {
        self.repository.create_feedback(feedback).await?;
        tracing::debug!(feedback_id = %feedback.id, "Feedback stored");
        Ok(())
    }

    async fn list_feedback(&self, status: Option<FeedbackStatus>) -> Result<Vec<QrFeedback>> {
        self.repository.list_feedback(status).await
    }

    async fn get_feedback(&self, id: Uuid) -> Result<Option<QrFeedback>> {
        self.repository.get_feedback(id).await
    }

    async fn set_feedback_status(&self, id: Uuid, status: FeedbackStatus) -> Result<()> {
        self.repository.set_feedback_status(id, status).await?;
        tracing::debug!(feedback_id = %id, status = %status, "Feedback status changed");
        Ok(())
    }

    async fn count_pending_feedback(&self) -> Result<u64> {
        self.repository.count_pending_feedback().await
    }
}

#[async_trait]
impl<R, C> CurationRepository for CachedContentStore<R, C>
where
    R: ContentStore + 'static,
    C: TagCache + 'static,
{
    async fn list_featured_items(&self) -> Result<Vec<FeaturedItem>> {
        let mut entry_tags = tags(&[HOMEPAGE_TAG]);
        entry_tags.push(kind_tag(ContentKind::FeaturedItem));
        self.read_through(
            featured_key(),
            entry_tags,
            self.repository.list_featured_items(),
        )
        .await
    }

    async fn get_featured_item(&self, id: Uuid) -> Result<Option<FeaturedItem>> {
        self.read_through(
            doc_key(ContentKind::FeaturedItem, id),
            vec![kind_tag(ContentKind::FeaturedItem)],
            self.repository.get_featured_item(id),
        )
        .await
    }

    async fn create_featured_item(&self, item: &FeaturedItem) -> Result<()> {
        self.repository.create_featured_item(item).await?;
        self.flush(ContentKind::FeaturedItem, &[HOMEPAGE_TAG]).await;
        tracing::debug!(item_id = %item.id, "Featured item created");
        Ok(())
    }

    async fn update_featured_item(&self, item: &FeaturedItem) -> Result<()> {
        self.repository.update_featured_item(item).await?;
        self.flush(ContentKind::FeaturedItem, &[HOMEPAGE_TAG]).await;
        tracing::debug!(item_id = %item.id, "Featured item updated");
        Ok(())
    }

    async fn delete_featured_item(&self, id: Uuid) -> Result<()> {
        self.repository.delete_featured_item(id).await?;
        self.flush(ContentKind::FeaturedItem, &[HOMEPAGE_TAG]).await;
        tracing::debug!(item_id = %id, "Featured item deleted");
        Ok(())
    }

    async fn list_homepage_sections(&self) -> Result<Vec<HomepageSection>> {
        let mut entry_tags = tags(&[HOMEPAGE_TAG]);
        entry_tags.push(kind_tag(ContentKind::HomepageSection));
        self.read_through(
            sections_key(),
            entry_tags,
            self.repository.list_homepage_sections(),
        )
        .await
    }

    async fn get_homepage_section(&self, id: Uuid) -> Result<Option<HomepageSection>> {
        self.read_through(
            doc_key(ContentKind::HomepageSection, id),
            vec![kind_tag(ContentKind::HomepageSection)],
            self.repository.get_homepage_section(id),
        )
        .await
    }

    async fn create_homepage_section(&self, section: &HomepageSection) -> Result<()> {
        self.repository.create_homepage_section(section).await?;
        self.flush(ContentKind::HomepageSection, &[HOMEPAGE_TAG])
            .await;
        tracing::debug!(section_id = %section.id, "Homepage section created");
        Ok(())
    }

    async fn update_homepage_section(&self, section: &HomepageSection) -> Result<()> {
        self.repository.update_homepage_section(section).await?;
        self.flush(ContentKind::HomepageSection, &[HOMEPAGE_TAG])
            .await;
        tracing::debug!(section_id = %section.id, "Homepage section updated");
        Ok(())
    }

    async fn delete_homepage_section(&self, id: Uuid) -> Result<()> {
        self.repository.delete_homepage_section(id).await?;
        self.flush(ContentKind::HomepageSection, &[HOMEPAGE_TAG])
            .await;
        tracing::debug!(section_id = %id, "Homepage section deleted");
        Ok(())
    }

    async fn replace_homepage_sections(&self, sections: &[HomepageSection]) -> Result<()> {
        self.repository.replace_homepage_sections(sections).await?;
        self.flush(ContentKind::HomepageSection, &[HOMEPAGE_TAG])
            .await;
        tracing::debug!(count = sections.len(), "Homepage sections replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cache::MemoryTagCache, content::inmemory::InMemoryContentStore};

    fn cached(
        inner: Arc<InMemoryContentStore>,
    ) -> CachedContentStore<InMemoryContentStore, MemoryTagCache> {
        CachedContentStore::new(
            inner,
            Arc::new(MemoryTagCache::new(100)),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn reads_are_cached_until_a_write_invalidates() {
        let inner = Arc::new(InMemoryContentStore::new());
        let store = cached(inner.clone());

        store.create_city(&City::new("Sevilla", "sevilla")).await.unwrap();
        assert_eq!(store.list_cities().await.unwrap().len(), 1);

        // Write bypassing the decorator: the cached list does not see it.
        inner.create_city(&City::new("Madrid", "madrid")).await.unwrap();
        assert_eq!(store.list_cities().await.unwrap().len(), 1);

        // A write through the decorator flushes the kind tag.
        store.create_city(&City::new("Cádiz", "cadiz")).await.unwrap();
        assert_eq!(store.list_cities().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn negative_lookups_are_dropped_on_create() {
        let inner = Arc::new(InMemoryContentStore::new());
        let store = cached(inner);

        assert!(store.find_city_by_slug("sevilla").await.unwrap().is_none());

        store.create_city(&City::new("Sevilla", "sevilla")).await.unwrap();
        assert!(store.find_city_by_slug("sevilla").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn city_rename_invalidates_venue_stamps() {
        let inner = Arc::new(InMemoryContentStore::new());
        let store = cached(inner);

        let mut city = City::new("Sevilla", "sevilla");
        store.create_city(&city).await.unwrap();
        store
            .create_venue(&Venue::new(city.id, "Casa Paco", "casa-paco", "Calle Sierpes 1"))
            .await
            .unwrap();

        let stamps = store.venue_stamps().await.unwrap();
        assert_eq!(stamps[0].city_slug, "sevilla");

        // The stamps entry carries the city kind tag, so a city write
        // flushes it even though no venue changed.
        city.slug = "sevilla-capital".to_string();
        store.update_city(&city).await.unwrap();

        let stamps = store.venue_stamps().await.unwrap();
        assert_eq!(stamps[0].city_slug, "sevilla-capital");
    }

    #[tokio::test]
    async fn qr_reads_always_see_fresh_use_counts() {
        let inner = Arc::new(InMemoryContentStore::new());
        let store = cached(inner);

        let city = City::new("Sevilla", "sevilla");
        store.create_city(&city).await.unwrap();
        let venue = Venue::new(city.id, "Casa Paco", "casa-paco", "Calle Sierpes 1");
        store.create_venue(&venue).await.unwrap();

        let qr_code = QrCode::new(venue.id, "MESA1").with_max_uses(2);
        store.create_qr_code(&qr_code).await.unwrap();

        store.record_qr_use(qr_code.id, Utc::now()).await.unwrap();
        let fresh = store.find_qr_code("MESA1").await.unwrap().unwrap();
        assert_eq!(fresh.current_uses, 1);

        store.record_qr_use(qr_code.id, Utc::now()).await.unwrap();
        let fresh = store.find_qr_code("MESA1").await.unwrap().unwrap();
        assert_eq!(fresh.current_uses, 2);
        assert!(!fresh.has_uses_remaining());
    }

    #[tokio::test]
    async fn counts_bypass_the_cache() {
        let inner = Arc::new(InMemoryContentStore::new());
        let store = cached(inner.clone());

        assert_eq!(store.count_cities().await.unwrap(), 0);
        inner.create_city(&City::new("Madrid", "madrid")).await.unwrap();
        assert_eq!(store.count_cities().await.unwrap(), 1);
    }
}
