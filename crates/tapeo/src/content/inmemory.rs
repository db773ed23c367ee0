//! In-memory content store.
//!
//! Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
//! Data is not persisted and will be lost when the store is dropped.
//! Slug-uniqueness and deletion guards match the HTTP store so the two
//! backends are interchangeable.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tapeo_core::{
    content::{Category, City, ContentKind, FeaturedItem, Guide, HomepageSection, Review, Venue},
    qr::{FeedbackStatus, QrCode, QrFeedback},
    storage::{
        CategoryRepository, CityRepository, ContentError, CurationRepository, GuideRepository,
        GuideStamp, QrRepository, Result, ReviewRepository, ReviewStamp, VenueRepository,
        VenueStamp,
    },
};
use tokio::sync::RwLock;
use uuid::Uuid;

fn index_by_id<T>(items: Vec<T>, id: impl Fn(&T) -> Uuid) -> Arc<RwLock<HashMap<Uuid, T>>> {
    Arc::new(RwLock::new(
        items.into_iter().map(|item| (id(&item), item)).collect(),
    ))
}

/// In-memory content backend for demos and tests.
#[derive(Debug, Clone)]
pub struct InMemoryContentStore {
    cities: Arc<RwLock<HashMap<Uuid, City>>>,
    venues: Arc<RwLock<HashMap<Uuid, Venue>>>,
    reviews: Arc<RwLock<HashMap<Uuid, Review>>>,
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
    guides: Arc<RwLock<HashMap<Uuid, Guide>>>,
    qr_codes: Arc<RwLock<HashMap<Uuid, QrCode>>>,
    feedback: Arc<RwLock<HashMap<Uuid, QrFeedback>>>,
    featured: Arc<RwLock<HashMap<Uuid, FeaturedItem>>>,
    sections: Arc<RwLock<HashMap<Uuid, HomepageSection>>>,
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContentStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            cities: Arc::new(RwLock::new(HashMap::new())),
            venues: Arc::new(RwLock::new(HashMap::new())),
            reviews: Arc::new(RwLock::new(HashMap::new())),
            categories: Arc::new(RwLock::new(HashMap::new())),
            guides: Arc::new(RwLock::new(HashMap::new())),
            qr_codes: Arc::new(RwLock::new(HashMap::new())),
            feedback: Arc::new(RwLock::new(HashMap::new())),
            featured: Arc::new(RwLock::new(HashMap::new())),
            sections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a store pre-loaded with the demo dataset.
    #[cfg(feature = "inmemory")]
    pub fn with_demo_data() -> Self {
        let docs = crate::demo_data::documents();
        Self {
            cities: index_by_id(docs.cities, |c| c.id),
            venues: index_by_id(docs.venues, |v| v.id),
            reviews: index_by_id(docs.reviews, |r| r.id),
            categories: index_by_id(docs.categories, |c| c.id),
            guides: index_by_id(docs.guides, |g| g.id),
            qr_codes: index_by_id(docs.qr_codes, |q| q.id),
            feedback: Arc::new(RwLock::new(HashMap::new())),
            featured: index_by_id(docs.featured, |f| f.id),
            sections: index_by_id(docs.sections, |s| s.id),
        }
    }
}

#[async_trait]
impl CityRepository for InMemoryContentStore {
    async fn list_cities(&self) -> Result<Vec<City>> {
        let cities = self.cities.read().await;
        let mut list: Vec<City> = cities.values().cloned().collect();
        list.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(list)
    }

    async fn get_city(&self, id: Uuid) -> Result<Option<City>> {
        let cities = self.cities.read().await;
        Ok(cities.get(&id).cloned())
    }

    async fn find_city_by_slug(&self, slug: &str) -> Result<Option<City>> {
        let cities = self.cities.read().await;
        Ok(cities.values().find(|c| c.slug == slug).cloned())
    }

    async fn create_city(&self, city: &City) -> Result<()> {
        let mut cities = self.cities.write().await;
        if cities.values().any(|c| c.slug == city.slug && c.id != city.id) {
            return Err(ContentError::slug_conflict(ContentKind::City));
        }
        cities.insert(city.id, city.clone());
        Ok(())
    }

    async fn update_city(&self, city: &City) -> Result<()> {
        let mut cities = self.cities.write().await;
        if !cities.contains_key(&city.id) {
            return Err(ContentError::not_found(ContentKind::City, city.id.to_string()));
        }
        if cities.values().any(|c| c.slug == city.slug && c.id != city.id) {
            return Err(ContentError::slug_conflict(ContentKind::City));
        }
        cities.insert(city.id, city.clone());
        Ok(())
    }

    async fn delete_city(&self, id: Uuid) -> Result<()> {
        if self.count_venues_in_city(id).await? > 0 {
            return Err(ContentError::has_children(
                ContentKind::City,
                ContentKind::Venue,
            ));
        }
        let mut cities = self.cities.write().await;
        if cities.remove(&id).is_none() {
            return Err(ContentError::not_found(ContentKind::City, id.to_string()));
        }
        Ok(())
    }

    async fn count_cities(&self) -> Result<u64> {
        Ok(self.cities.read().await.len() as u64)
    }
}

#[async_trait]
impl VenueRepository for InMemoryContentStore {
    async fn list_venues(&self, city_id: Option<Uuid>) -> Result<Vec<Venue>> {
        let venues = self.venues.read().await;
        let mut list: Vec<Venue> = venues
            .values()
            .filter(|v| city_id.is_none_or(|id| v.city_id == id))
            .cloned()
            .collect();
        list.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(list)
    }

    async fn get_venue(&self, id: Uuid) -> Result<Option<Venue>> {
        let venues = self.venues.read().await;
        Ok(venues.get(&id).cloned())
    }

    async fn find_venue_by_slug(&self, city_id: Uuid, slug: &str) -> Result<Option<Venue>> {
        let venues = self.venues.read().await;
        Ok(venues
            .values()
            .find(|v| v.city_id == city_id && v.slug == slug)
            .cloned())
    }

    async fn create_venue(&self, venue: &Venue) -> Result<()> {
        let mut venues = self.venues.write().await;
        if venues
            .values()
            .any(|v| v.city_id == venue.city_id && v.slug == venue.slug && v.id != venue.id)
        {
            return Err(ContentError::slug_conflict(ContentKind::Venue));
        }
        venues.insert(venue.id, venue.clone());
        Ok(())
    }

    async fn update_venue(&self, venue: &Venue) -> Result<()> {
        let mut venues = self.venues.write().await;
        if !venues.contains_key(&venue.id) {
            return Err(ContentError::not_found(
                ContentKind::Venue,
                venue.id.to_string(),
            ));
        }
        if venues
            .values()
            .any(|v| v.city_id == venue.city_id && v.slug == venue.slug && v.id != venue.id)
        {
            return Err(ContentError::slug_conflict(ContentKind::Venue));
        }
        venues.insert(venue.id, venue.clone());
        Ok(())
    }

    async fn delete_venue(&self, id: Uuid) -> Result<()> {
        if self.count_reviews_for_venue(id).await? > 0 {
            return Err(ContentError::has_children(
                ContentKind::Venue,
                ContentKind::Review,
            ));
        }
        if self.count_qr_codes_for_venue(id).await? > 0 {
            return Err(ContentError::has_children(
                ContentKind::Venue,
                ContentKind::QrCode,
            ));
        }
        let mut venues = self.venues.write().await;
        if venues.remove(&id).is_none() {
            return Err(ContentError::not_found(ContentKind::Venue, id.to_string()));
        }
        Ok(())
    }

    async fn count_venues(&self) -> Result<u64> {
        Ok(self.venues.read().await.len() as u64)
    }

    async fn count_venues_in_city(&self, city_id: Uuid) -> Result<u64> {
        let venues = self.venues.read().await;
        Ok(venues.values().filter(|v| v.city_id == city_id).count() as u64)
    }

    async fn count_venues_with_category(&self, category_id: Uuid) -> Result<u64> {
        let venues = self.venues.read().await;
        Ok(venues
            .values()
            .filter(|v| v.category_ids.contains(&category_id))
            .count() as u64)
    }

    async fn venue_stamps(&self) -> Result<Vec<VenueStamp>> {
        let cities = self.cities.read().await;
        let venues = self.venues.read().await;

        Ok(venues
            .values()
            .filter_map(|venue| {
                let city = cities.get(&venue.city_id)?;
                Some(VenueStamp {
                    slug: venue.slug.clone(),
                    city_slug: city.slug.clone(),
                    updated_at: venue.updated_at,
                })
            })
            .collect())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryContentStore {
    async fn list_reviews(&self, venue_id: Option<Uuid>) -> Result<Vec<Review>> {
        let reviews = self.reviews.read().await;
        let mut list: Vec<Review> = reviews
            .values()
            .filter(|r| venue_id.is_none_or(|id| r.venue_id == id))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(list)
    }

    async fn list_recent_reviews(&self, limit: u32) -> Result<Vec<Review>> {
        let reviews = self.reviews.read().await;
        let mut list: Vec<Review> = reviews
            .values()
            .filter(|r| r.is_published())
            .cloned()
            .collect();
        list.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        list.truncate(limit as usize);
        Ok(list)
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(&id).cloned())
    }

    async fn find_review_by_slug(&self, venue_id: Uuid, slug: &str) -> Result<Option<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .values()
            .find(|r| r.venue_id == venue_id && r.slug == slug)
            .cloned())
    }

    async fn create_review(&self, review: &Review) -> Result<()> {
        let mut reviews = self.reviews.write().await;
        if reviews
            .values()
            .any(|r| r.venue_id == review.venue_id && r.slug == review.slug && r.id != review.id)
        {
            return Err(ContentError::slug_conflict(ContentKind::Review));
        }
        reviews.insert(review.id, review.clone());
        Ok(())
    }

    async fn update_review(&self, review: &Review) -> Result<()> {
        let mut reviews = self.reviews.write().await;
        if !reviews.contains_key(&review.id) {
            return Err(ContentError::not_found(
                ContentKind::Review,
                review.id.to_string(),
            ));
        }
        if reviews
            .values()
            .any(|r| r.venue_id == review.venue_id && r.slug == review.slug && r.id != review.id)
        {
            return Err(ContentError::slug_conflict(ContentKind::Review));
        }
        reviews.insert(review.id, review.clone());
        Ok(())
    }

    async fn delete_review(&self, id: Uuid) -> Result<()> {
        let mut reviews = self.reviews.write().await;
        if reviews.remove(&id).is_none() {
            return Err(ContentError::not_found(ContentKind::Review, id.to_string()));
        }
        Ok(())
    }

    async fn count_reviews(&self) -> Result<u64> {
        Ok(self.reviews.read().await.len() as u64)
    }

    async fn count_reviews_for_venue(&self, venue_id: Uuid) -> Result<u64> {
        let reviews = self.reviews.read().await;
        Ok(reviews.values().filter(|r| r.venue_id == venue_id).count() as u64)
    }

    async fn review_stamps(&self) -> Result<Vec<ReviewStamp>> {
        let cities = self.cities.read().await;
        let venues = self.venues.read().await;
        let reviews = self.reviews.read().await;

        Ok(reviews
            .values()
            .filter(|review| review.is_published())
            .filter_map(|review| {
                let venue = venues.get(&review.venue_id)?;
                let city = cities.get(&venue.city_id)?;
                Some(ReviewStamp {
                    slug: review.slug.clone(),
                    venue_slug: venue.slug.clone(),
                    city_slug: city.slug.clone(),
                    published_at: review.published_at,
                    updated_at: review.updated_at,
                })
            })
            .collect())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryContentStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        let mut list: Vec<Category> = categories.values().cloned().collect();
        list.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(list)
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn create_category(&self, category: &Category) -> Result<()> {
        let mut categories = self.categories.write().await;
        if categories
            .values()
            .any(|c| c.slug == category.slug && c.id != category.id)
        {
            return Err(ContentError::slug_conflict(ContentKind::Category));
        }
        categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        let mut categories = self.categories.write().await;
        if !categories.contains_key(&category.id) {
            return Err(ContentError::not_found(
                ContentKind::Category,
                category.id.to_string(),
            ));
        }
        if categories
            .values()
            .any(|c| c.slug == category.slug && c.id != category.id)
        {
            return Err(ContentError::slug_conflict(ContentKind::Category));
        }
        categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<()> {
        if self.count_venues_with_category(id).await? > 0 {
            return Err(ContentError::has_children(
                ContentKind::Category,
                ContentKind::Venue,
            ));
        }
        let mut categories = self.categories.write().await;
        if categories.remove(&id).is_none() {
            return Err(ContentError::not_found(
                ContentKind::Category,
                id.to_string(),
            ));
        }
        Ok(())
    }

    async fn count_categories(&self) -> Result<u64> {
        Ok(self.categories.read().await.len() as u64)
    }
}

#[async_trait]
impl GuideRepository for InMemoryContentStore {
    async fn list_guides(&self) -> Result<Vec<Guide>> {
        let guides = self.guides.read().await;
        let mut list: Vec<Guide> = guides.values().cloned().collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(list)
    }

    async fn list_published_guides(&self) -> Result<Vec<Guide>> {
        let guides = self.guides.read().await;
        let mut list: Vec<Guide> = guides
            .values()
            .filter(|g| g.is_published())
            .cloned()
            .collect();
        list.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(list)
    }

    async fn get_guide(&self, id: Uuid) -> Result<Option<Guide>> {
        let guides = self.guides.read().await;
        Ok(guides.get(&id).cloned())
    }

    async fn find_guide_by_slug(&self, slug: &str) -> Result<Option<Guide>> {
        let guides = self.guides.read().await;
        Ok(guides.values().find(|g| g.slug == slug).cloned())
    }

    async fn create_guide(&self, guide: &Guide) -> Result<()> {
        let mut guides = self.guides.write().await;
        if guides
            .values()
            .any(|g| g.slug == guide.slug && g.id != guide.id)
        {
            return Err(ContentError::slug_conflict(ContentKind::Guide));
        }
        guides.insert(guide.id, guide.clone());
        Ok(())
    }

    async fn update_guide(&self, guide: &Guide) -> Result<()> {
        let mut guides = self.guides.write().await;
        if !guides.contains_key(&guide.id) {
            return Err(ContentError::not_found(
                ContentKind::Guide,
                guide.id.to_string(),
            ));
        }
        if guides
            .values()
            .any(|g| g.slug == guide.slug && g.id != guide.id)
        {
            return Err(ContentError::slug_conflict(ContentKind::Guide));
        }
        guides.insert(guide.id, guide.clone());
        Ok(())
    }

    async fn delete_guide(&self, id: Uuid) -> Result<()> {
        let mut guides = self.guides.write().await;
        if guides.remove(&id).is_none() {
            return Err(ContentError::not_found(ContentKind::Guide, id.to_string()));
        }
        Ok(())
    }

    async fn count_guides(&self) -> Result<u64> {
        Ok(self.guides.read().await.len() as u64)
    }

    async fn guide_stamps(&self) -> Result<Vec<GuideStamp>> {
        let guides = self.guides.read().await;
        Ok(guides
            .values()
            .filter(|g| g.is_published())
            .map(|g| GuideStamp {
                slug: g.slug.clone(),
                published_at: g.published_at,
                updated_at: g.updated_at,
            })
            .collect())
    }
}

#[async_trait]
impl QrRepository for InMemoryContentStore {
    async fn list_qr_codes(&self, venue_id: Option<Uuid>) -> Result<Vec<QrCode>> {
        let qr_codes = self.qr_codes.read().await;
        let mut list: Vec<QrCode> = qr_codes
            .values()
            .filter(|q| venue_id.is_none_or(|id| q.venue_id == id))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(list)
    }

    async fn get_qr_code(&self, id: Uuid) -> Result<Option<QrCode>> {
        let qr_codes = self.qr_codes.read().await;
        Ok(qr_codes.get(&id).cloned())
    }

    async fn find_qr_code(&self, code: &str) -> Result<Option<QrCode>> {
        let qr_codes = self.qr_codes.read().await;
        Ok(qr_codes.values().find(|q| q.code == code).cloned())
    }

    async fn create_qr_code(&self, qr_code: &QrCode) -> Result<()> {
        let mut qr_codes = self.qr_codes.write().await;
        qr_codes.insert(qr_code.id, qr_code.clone());
        Ok(())
    }

    async fn update_qr_code(&self, qr_code: &QrCode) -> Result<()> {
        let mut qr_codes = self.qr_codes.write().await;
        if !qr_codes.contains_key(&qr_code.id) {
            return Err(ContentError::not_found(
                ContentKind::QrCode,
                qr_code.id.to_string(),
            ));
        }
        qr_codes.insert(qr_code.id, qr_code.clone());
        Ok(())
    }

    async fn delete_qr_code(&self, id: Uuid) -> Result<()> {
        let mut qr_codes = self.qr_codes.write().await;
        if qr_codes.remove(&id).is_none() {
            return Err(ContentError::not_found(ContentKind::QrCode, id.to_string()));
        }
        Ok(())
    }

    async fn record_qr_use(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let mut qr_codes = self.qr_codes.write().await;
        let qr_code = qr_codes
            .get_mut(&id)
            .ok_or_else(|| ContentError::not_found(ContentKind::QrCode, id.to_string()))?;
        qr_code.current_uses += 1;
        qr_code.last_used_at = Some(at);
        qr_code.updated_at = at;
        Ok(())
    }

    async fn count_qr_codes_for_venue(&self, venue_id: Uuid) -> Result<u64> {
        let qr_codes = self.qr_codes.read().await;
        Ok(qr_codes.values().filter(|q| q.venue_id == venue_id).count() as u64)
    }

    async fn create_feedback(&self, feedback: &QrFeedback) -> Result<()> {
        let mut entries = self.feedback.write().await;
        entries.insert(feedback.id, feedback.clone());
        Ok(())
    }

    async fn list_feedback(&self, status: Option<FeedbackStatus>) -> Result<Vec<QrFeedback>> {
        let entries = self.feedback.read().await;
        let mut list: Vec<QrFeedback> = entries
            .values()
            .filter(|f| status.is_none_or(|s| f.status == s))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn get_feedback(&self, id: Uuid) -> Result<Option<QrFeedback>> {
        let entries = self.feedback.read().await;
        Ok(entries.get(&id).cloned())
    }

    async fn set_feedback_status(&self, id: Uuid, status: FeedbackStatus) -> Result<()> {
        let mut entries = self.feedback.write().await;
        let entry = entries
            .get_mut(&id)
            .ok_or_else(|| ContentError::not_found(ContentKind::QrFeedback, id.to_string()))?;
        entry.status = status;
        Ok(())
    }

    async fn count_pending_feedback(&self) -> Result<u64> {
        let entries = self.feedback.read().await;
        Ok(entries
            .values()
            .filter(|f| f.status == FeedbackStatus::Pending)
            .count() as u64)
    }
}

#[async_trait]
impl CurationRepository for InMemoryContentStore {
    async fn list_featured_items(&self) -> Result<Vec<FeaturedItem>> {
        let featured = self.featured.read().await;
        let mut list: Vec<FeaturedItem> = featured.values().cloned().collect();
        list.sort_by_key(|f| f.position);
        Ok(list)
    }

    async fn get_featured_item(&self, id: Uuid) -> Result<Option<FeaturedItem>> {
        let featured = self.featured.read().await;
        Ok(featured.get(&id).cloned())
    }

    async fn create_featured_item(&self, item: &FeaturedItem) -> Result<()> {
        let mut featured = self.featured.write().await;
        featured.insert(item.id, item.clone());
        Ok(())
    }

    async fn update_featured_item(&self, item: &FeaturedItem) -> Result<()> {
        let mut featured = self.featured.write().await;
        if !featured.contains_key(&item.id) {
            return Err(ContentError::not_found(
                ContentKind::FeaturedItem,
                item.id.to_string(),
            ));
        }
        featured.insert(item.id, item.clone());
        Ok(())
    }

    async fn delete_featured_item(&self, id: Uuid) -> Result<()> {
        let mut featured = self.featured.write().await;
        if featured.remove(&id).is_none() {
            return Err(ContentError::not_found(
                ContentKind::FeaturedItem,
                id.to_string(),
            ));
        }
        Ok(())
    }

    async fn list_homepage_sections(&self) -> Result<Vec<HomepageSection>> {
        let sections = self.sections.read().await;
        let mut list: Vec<HomepageSection> = sections.values().cloned().collect();
        list.sort_by_key(|s| s.position);
        Ok(list)
    }

    async fn get_homepage_section(&self, id: Uuid) -> Result<Option<HomepageSection>> {
        let sections = self.sections.read().await;
        Ok(sections.get(&id).cloned())
    }

    async fn create_homepage_section(&self, section: &HomepageSection) -> Result<()> {
        let mut sections = self.sections.write().await;
        sections.insert(section.id, section.clone());
        Ok(())
    }

    async fn update_homepage_section(&self, section: &HomepageSection) -> Result<()> {
        let mut sections = self.sections.write().await;
        if !sections.contains_key(&section.id) {
            return Err(ContentError::not_found(
                ContentKind::HomepageSection,
                section.id.to_string(),
            ));
        }
        sections.insert(section.id, section.clone());
        Ok(())
    }

    async fn delete_homepage_section(&self, id: Uuid) -> Result<()> {
        let mut sections = self.sections.write().await;
        if sections.remove(&id).is_none() {
            return Err(ContentError::not_found(
                ContentKind::HomepageSection,
                id.to_string(),
            ));
        }
        Ok(())
    }

    async fn replace_homepage_sections(&self, new_sections: &[HomepageSection]) -> Result<()> {
        let mut sections = self.sections.write().await;
        sections.clear();
        for section in new_sections {
            sections.insert(section.id, section.clone());
        }
        Ok(())
    }
}
