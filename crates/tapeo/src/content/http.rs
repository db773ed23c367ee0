//! Content store backed by the headless CMS HTTP API.
//!
//! Reads go through `GET /v1/data/query/{dataset}` with a `query`
//! parameter and `$name` JSON-encoded values; the response is an
//! envelope `{"result": ...}`. Writes go through
//! `POST /v1/data/mutate/{dataset}` with a `mutations` array and a
//! bearer token. Slug-uniqueness and deletion guards are enforced here
//! so every caller gets the same conflict semantics.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tapeo_core::{
    content::{Category, City, ContentKind, FeaturedItem, Guide, HomepageSection, Review, Venue},
    qr::{FeedbackStatus, QrCode, QrFeedback},
    storage::{
        CategoryRepository, CityRepository, ContentError, CurationRepository, GuideRepository,
        GuideStamp, QrRepository, Result, ReviewRepository, ReviewStamp, VenueRepository,
        VenueStamp,
    },
};
use uuid::Uuid;

use crate::content::query::{self, QueryParams};

/// Response envelope for queries.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

// Projections used to join sitemap stamps in memory.
#[derive(Debug, Deserialize)]
struct SlugRef {
    id: Uuid,
    slug: String,
}

#[derive(Debug, Deserialize)]
struct VenueRef {
    id: Uuid,
    slug: String,
    city_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct VenueStampRow {
    slug: String,
    city_id: Uuid,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ReviewStampRow {
    slug: String,
    venue_id: Uuid,
    published_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

/// HTTP client for the content dataset.
pub struct HttpContentStore {
    client: reqwest::Client,
    base_url: String,
    dataset: String,
    token: Option<String>,
}

impl HttpContentStore {
    /// Creates a store for one dataset. The token is required for
    /// mutations; reads work without it on public datasets.
    pub fn new(
        base_url: impl Into<String>,
        dataset: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            dataset: dataset.into(),
            token,
        }
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, params: QueryParams) -> Result<T> {
        let mut url = format!(
            "{}/v1/data/query/{}?query={}",
            self.base_url,
            self.dataset,
            urlencoding::encode(query)
        );
        if !params.is_empty() {
            url.push('&');
            url.push_str(&params.encode());
        }

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ContentError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::QueryFailed(format!("{status}: {body}")));
        }

        let envelope: QueryResponse<T> = response
            .json()
            .await
            .map_err(|e| ContentError::Serialization(e.to_string()))?;

        Ok(envelope.result)
    }

    async fn mutate(&self, mutations: Vec<serde_json::Value>) -> Result<()> {
        let url = format!("{}/v1/data/mutate/{}", self.base_url, self.dataset);

        let mut request = self
            .client
            .post(&url)
            .json(&json!({ "mutations": mutations }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ContentError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::QueryFailed(format!("{status}: {body}")));
        }

        Ok(())
    }

    /// Serializes a document and stamps its `_type` so queries can
    /// filter on it.
    fn typed_doc<T: Serialize>(kind: ContentKind, doc: &T) -> Result<serde_json::Value> {
        let mut value =
            serde_json::to_value(doc).map_err(|e| ContentError::Serialization(e.to_string()))?;
        match value.as_object_mut() {
            Some(map) => {
                map.insert("_type".to_string(), json!(kind.type_name()));
                Ok(value)
            }
            None => Err(ContentError::Serialization(
                "document is not a JSON object".to_string(),
            )),
        }
    }

    async fn create_doc<T: Serialize>(&self, kind: ContentKind, doc: &T) -> Result<()> {
        let value = Self::typed_doc(kind, doc)?;
        self.mutate(vec![json!({ "create": value })]).await
    }

    async fn replace_doc<T: Serialize>(&self, kind: ContentKind, doc: &T) -> Result<()> {
        let value = Self::typed_doc(kind, doc)?;
        self.mutate(vec![json!({ "createOrReplace": value })]).await
    }

    async fn delete_doc(&self, id: Uuid) -> Result<()> {
        self.mutate(vec![json!({ "delete": { "id": id } })]).await
    }
}

#[async_trait]
impl CityRepository for HttpContentStore {
    async fn list_cities(&self) -> Result<Vec<City>> {
        self.query(query::CITIES, QueryParams::new()).await
    }

    async fn get_city(&self, id: Uuid) -> Result<Option<City>> {
        self.query(query::CITY_BY_ID, QueryParams::new().set("id", id))
            .await
    }

    async fn find_city_by_slug(&self, slug: &str) -> Result<Option<City>> {
        self.query(query::CITY_BY_SLUG, QueryParams::new().set("slug", slug))
            .await
    }

    async fn create_city(&self, city: &City) -> Result<()> {
        if let Some(existing) = self.find_city_by_slug(&city.slug).await? {
            if existing.id != city.id {
                return Err(ContentError::slug_conflict(ContentKind::City));
            }
        }
        self.create_doc(ContentKind::City, city).await
    }

    async fn update_city(&self, city: &City) -> Result<()> {
        if self.get_city(city.id).await?.is_none() {
            return Err(ContentError::not_found(ContentKind::City, city.id.to_string()));
        }
        if let Some(existing) = self.find_city_by_slug(&city.slug).await? {
            if existing.id != city.id {
                return Err(ContentError::slug_conflict(ContentKind::City));
            }
        }
        self.replace_doc(ContentKind::City, city).await
    }

    async fn delete_city(&self, id: Uuid) -> Result<()> {
        if self.get_city(id).await?.is_none() {
            return Err(ContentError::not_found(ContentKind::City, id.to_string()));
        }
        if self.count_venues_in_city(id).await? > 0 {
            return Err(ContentError::has_children(
                ContentKind::City,
                ContentKind::Venue,
            ));
        }
        self.delete_doc(id).await
    }

    async fn count_cities(&self) -> Result<u64> {
        self.query(query::COUNT_CITIES, QueryParams::new()).await
    }
}

#[async_trait]
impl VenueRepository for HttpContentStore {
    async fn list_venues(&self, city_id: Option<Uuid>) -> Result<Vec<Venue>> {
        match city_id {
            Some(city_id) => {
                self.query(
                    query::VENUES_BY_CITY,
                    QueryParams::new().set("city_id", city_id),
                )
                .await
            }
            None => self.query(query::VENUES, QueryParams::new()).await,
        }
    }

    async fn get_venue(&self, id: Uuid) -> Result<Option<Venue>> {
        self.query(query::VENUE_BY_ID, QueryParams::new().set("id", id))
            .await
    }

    async fn find_venue_by_slug(&self, city_id: Uuid, slug: &str) -> Result<Option<Venue>> {
        self.query(
            query::VENUE_BY_SLUG,
            QueryParams::new().set("city_id", city_id).set("slug", slug),
        )
        .await
    }

    async fn create_venue(&self, venue: &Venue) -> Result<()> {
        if let Some(existing) = self.find_venue_by_slug(venue.city_id, &venue.slug).await? {
            if existing.id != venue.id {
                return Err(ContentError::slug_conflict(ContentKind::Venue));
            }
        }
        self.create_doc(ContentKind::Venue, venue).await
    }

    async fn update_venue(&self, venue: &Venue) -> Result<()> {
        if self.get_venue(venue.id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::Venue,
                venue.id.to_string(),
            ));
        }
        if let Some(existing) = self.find_venue_by_slug(venue.city_id, &venue.slug).await? {
            if existing.id != venue.id {
                return Err(ContentError::slug_conflict(ContentKind::Venue));
            }
        }
        self.replace_doc(ContentKind::Venue, venue).await
    }

    async fn delete_venue(&self, id: Uuid) -> Result<()> {
        if self.get_venue(id).await?.is_none() {
            return Err(ContentError::not_found(ContentKind::Venue, id.to_string()));
        }
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
        self.delete_doc(id).await
    }

    async fn count_venues(&self) -> Result<u64> {
        self.query(query::COUNT_VENUES, QueryParams::new()).await
    }

    async fn count_venues_in_city(&self, city_id: Uuid) -> Result<u64> {
        self.query(
            query::COUNT_VENUES_IN_CITY,
            QueryParams::new().set("city_id", city_id),
        )
        .await
    }

    async fn count_venues_with_category(&self, category_id: Uuid) -> Result<u64> {
        self.query(
            query::COUNT_VENUES_WITH_CATEGORY,
            QueryParams::new().set("category_id", category_id),
        )
        .await
    }

    async fn venue_stamps(&self) -> Result<Vec<VenueStamp>> {
        let rows: Vec<VenueStampRow> = self
            .query(query::VENUE_STAMP_FIELDS, QueryParams::new())
            .await?;
        let cities: Vec<SlugRef> = self.query(query::CITY_SLUGS, QueryParams::new()).await?;
        let city_slugs: HashMap<Uuid, String> =
            cities.into_iter().map(|c| (c.id, c.slug)).collect();

        // Venues whose city is gone have no URL and are skipped.
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let city_slug = city_slugs.get(&row.city_id)?.clone();
                Some(VenueStamp {
                    slug: row.slug,
                    city_slug,
                    updated_at: row.updated_at,
                })
            })
            .collect())
    }
}

#[async_trait]
impl ReviewRepository for HttpContentStore {
    async fn list_reviews(&self, venue_id: Option<Uuid>) -> Result<Vec<Review>> {
        match venue_id {
            Some(venue_id) => {
                self.query(
                    query::REVIEWS_BY_VENUE,
                    QueryParams::new().set("venue_id", venue_id),
                )
                .await
            }
            None => self.query(query::REVIEWS, QueryParams::new()).await,
        }
    }

    async fn list_recent_reviews(&self, limit: u32) -> Result<Vec<Review>> {
        self.query(query::RECENT_REVIEWS, QueryParams::new().set("limit", limit))
            .await
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>> {
        self.query(query::REVIEW_BY_ID, QueryParams::new().set("id", id))
            .await
    }

    async fn find_review_by_slug(&self, venue_id: Uuid, slug: &str) -> Result<Option<Review>> {
        self.query(
            query::REVIEW_BY_SLUG,
            QueryParams::new()
                .set("venue_id", venue_id)
                .set("slug", slug),
        )
        .await
    }

    async fn create_review(&self, review: &Review) -> Result<()> {
        if let Some(existing) = self
            .find_review_by_slug(review.venue_id, &review.slug)
            .await?
        {
            if existing.id != review.id {
                return Err(ContentError::slug_conflict(ContentKind::Review));
            }
        }
        self.create_doc(ContentKind::Review, review).await
    }

    async fn update_review(&self, review: &Review) -> Result<()> {
        if self.get_review(review.id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::Review,
                review.id.to_string(),
            ));
        }
        if let Some(existing) = self
            .find_review_by_slug(review.venue_id, &review.slug)
            .await?
        {
            if existing.id != review.id {
                return Err(ContentError::slug_conflict(ContentKind::Review));
            }
        }
        self.replace_doc(ContentKind::Review, review).await
    }

    async fn delete_review(&self, id: Uuid) -> Result<()> {
        if self.get_review(id).await?.is_none() {
            return Err(ContentError::not_found(ContentKind::Review, id.to_string()));
        }
        self.delete_doc(id).await
    }

    async fn count_reviews(&self) -> Result<u64> {
        self.query(query::COUNT_REVIEWS, QueryParams::new()).await
    }

    async fn count_reviews_for_venue(&self, venue_id: Uuid) -> Result<u64> {
        self.query(
            query::COUNT_REVIEWS_FOR_VENUE,
            QueryParams::new().set("venue_id", venue_id),
        )
        .await
    }

    async fn review_stamps(&self) -> Result<Vec<ReviewStamp>> {
        let rows: Vec<ReviewStampRow> = self
            .query(query::REVIEW_STAMP_FIELDS, QueryParams::new())
            .await?;
        let venues: Vec<VenueRef> = self.query(query::VENUE_SLUGS, QueryParams::new()).await?;
        let cities: Vec<SlugRef> = self.query(query::CITY_SLUGS, QueryParams::new()).await?;

        let city_slugs: HashMap<Uuid, String> =
            cities.into_iter().map(|c| (c.id, c.slug)).collect();
        let venue_refs: HashMap<Uuid, VenueRef> =
            venues.into_iter().map(|v| (v.id, v)).collect();

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let venue = venue_refs.get(&row.venue_id)?;
                let city_slug = city_slugs.get(&venue.city_id)?.clone();
                Some(ReviewStamp {
                    slug: row.slug,
                    venue_slug: venue.slug.clone(),
                    city_slug,
                    published_at: row.published_at,
                    updated_at: row.updated_at,
                })
            })
            .collect())
    }
}

#[async_trait]
impl CategoryRepository for HttpContentStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.query(query::CATEGORIES, QueryParams::new()).await
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<Category>> {
        self.query(query::CATEGORY_BY_ID, QueryParams::new().set("id", id))
            .await
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.query(
            query::CATEGORY_BY_SLUG,
            QueryParams::new().set("slug", slug),
        )
        .await
    }

    async fn create_category(&self, category: &Category) -> Result<()> {
        if let Some(existing) = self.find_category_by_slug(&category.slug).await? {
            if existing.id != category.id {
                return Err(ContentError::slug_conflict(ContentKind::Category));
            }
        }
        self.create_doc(ContentKind::Category, category).await
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        if self.get_category(category.id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::Category,
                category.id.to_string(),
            ));
        }
        if let Some(existing) = self.find_category_by_slug(&category.slug).await? {
            if existing.id != category.id {
                return Err(ContentError::slug_conflict(ContentKind::Category));
            }
        }
        self.replace_doc(ContentKind::Category, category).await
    }

    async fn delete_category(&self, id: Uuid) -> Result<()> {
        if self.get_category(id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::Category,
                id.to_string(),
            ));
        }
        if self.count_venues_with_category(id).await? > 0 {
            return Err(ContentError::has_children(
                ContentKind::Category,
                ContentKind::Venue,
            ));
        }
        self.delete_doc(id).await
    }

    async fn count_categories(&self) -> Result<u64> {
        self.query(query::COUNT_CATEGORIES, QueryParams::new())
            .await
    }
}

#[async_trait]
impl GuideRepository for HttpContentStore {
    async fn list_guides(&self) -> Result<Vec<Guide>> {
        self.query(query::GUIDES, QueryParams::new()).await
    }

    async fn list_published_guides(&self) -> Result<Vec<Guide>> {
        self.query(query::PUBLISHED_GUIDES, QueryParams::new())
            .await
    }

    async fn get_guide(&self, id: Uuid) -> Result<Option<Guide>> {
        self.query(query::GUIDE_BY_ID, QueryParams::new().set("id", id))
            .await
    }

    async fn find_guide_by_slug(&self, slug: &str) -> Result<Option<Guide>> {
        self.query(query::GUIDE_BY_SLUG, QueryParams::new().set("slug", slug))
            .await
    }

    async fn create_guide(&self, guide: &Guide) -> Result<()> {
        if let Some(existing) = self.find_guide_by_slug(&guide.slug).await? {
            if existing.id != guide.id {
                return Err(ContentError::slug_conflict(ContentKind::Guide));
            }
        }
        self.create_doc(ContentKind::Guide, guide).await
    }

    async fn update_guide(&self, guide: &Guide) -> Result<()> {
        if self.get_guide(guide.id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::Guide,
                guide.id.to_string(),
            ));
        }
        if let Some(existing) = self.find_guide_by_slug(&guide.slug).await? {
            if existing.id != guide.id {
                return Err(ContentError::slug_conflict(ContentKind::Guide));
            }
        }
        self.replace_doc(ContentKind::Guide, guide).await
    }

    async fn delete_guide(&self, id: Uuid) -> Result<()> {
        if self.get_guide(id).await?.is_none() {
            return Err(ContentError::not_found(ContentKind::Guide, id.to_string()));
        }
        self.delete_doc(id).await
    }

    async fn count_guides(&self) -> Result<u64> {
        self.query(query::COUNT_GUIDES, QueryParams::new()).await
    }

    async fn guide_stamps(&self) -> Result<Vec<GuideStamp>> {
        self.query(query::GUIDE_STAMPS, QueryParams::new()).await
    }
}

#[async_trait]
impl QrRepository for HttpContentStore {
    async fn list_qr_codes(&self, venue_id: Option<Uuid>) -> Result<Vec<QrCode>> {
        match venue_id {
            Some(venue_id) => {
                self.query(
                    query::QR_CODES_BY_VENUE,
                    QueryParams::new().set("venue_id", venue_id),
                )
                .await
            }
            None => self.query(query::QR_CODES, QueryParams::new()).await,
        }
    }

    async fn get_qr_code(&self, id: Uuid) -> Result<Option<QrCode>> {
        self.query(query::QR_BY_ID, QueryParams::new().set("id", id))
            .await
    }

    async fn find_qr_code(&self, code: &str) -> Result<Option<QrCode>> {
        self.query(query::QR_BY_CODE, QueryParams::new().set("code", code))
            .await
    }

    async fn create_qr_code(&self, qr_code: &QrCode) -> Result<()> {
        self.create_doc(ContentKind::QrCode, qr_code).await
    }

    async fn update_qr_code(&self, qr_code: &QrCode) -> Result<()> {
        if self.get_qr_code(qr_code.id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::QrCode,
                qr_code.id.to_string(),
            ));
        }
        self.replace_doc(ContentKind::QrCode, qr_code).await
    }

    async fn delete_qr_code(&self, id: Uuid) -> Result<()> {
        if self.get_qr_code(id).await?.is_none() {
            return Err(ContentError::not_found(ContentKind::QrCode, id.to_string()));
        }
        self.delete_doc(id).await
    }

    async fn record_qr_use(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        self.mutate(vec![json!({
            "patch": {
                "id": id,
                "inc": { "current_uses": 1 },
                "set": { "last_used_at": at, "updated_at": at },
            }
        })])
        .await
    }

    async fn count_qr_codes_for_venue(&self, venue_id: Uuid) -> Result<u64> {
        self.query(
            query::COUNT_QR_FOR_VENUE,
            QueryParams::new().set("venue_id", venue_id),
        )
        .await
    }

    async fn create_feedback(&self, feedback: &QrFeedback) -> Result<()> {
        self.create_doc(ContentKind::QrFeedback, feedback).await
    }

    async fn list_feedback(&self, status: Option<FeedbackStatus>) -> Result<Vec<QrFeedback>> {
        match status {
            Some(status) => {
                self.query(
                    query::FEEDBACK_BY_STATUS,
                    QueryParams::new().set("status", status),
                )
                .await
            }
            None => self.query(query::FEEDBACK, QueryParams::new()).await,
        }
    }

    async fn get_feedback(&self, id: Uuid) -> Result<Option<QrFeedback>> {
        self.query(query::FEEDBACK_BY_ID, QueryParams::new().set("id", id))
            .await
    }

    async fn set_feedback_status(&self, id: Uuid, status: FeedbackStatus) -> Result<()> {
        if self.get_feedback(id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::QrFeedback,
                id.to_string(),
            ));
        }
        self.mutate(vec![json!({
            "patch": { "id": id, "set": { "status": status } }
        })])
        .await
    }

    async fn count_pending_feedback(&self) -> Result<u64> {
        self.query(query::COUNT_PENDING_FEEDBACK, QueryParams::new())
            .await
    }
}

#[async_trait]
impl CurationRepository for HttpContentStore {
    async fn list_featured_items(&self) -> Result<Vec<FeaturedItem>> {
        self.query(query::FEATURED_ITEMS, QueryParams::new()).await
    }

    async fn get_featured_item(&self, id: Uuid) -> Result<Option<FeaturedItem>> {
        self.query(query::FEATURED_BY_ID, QueryParams::new().set("id", id))
            .await
    }

    async fn create_featured_item(&self, item: &FeaturedItem) -> Result<()> {
        self.create_doc(ContentKind::FeaturedItem, item).await
    }

    async fn update_featured_item(&self, item: &FeaturedItem) -> Result<()> {
        if self.get_featured_item(item.id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::FeaturedItem,
                item.id.to_string(),
            ));
        }
        self.replace_doc(ContentKind::FeaturedItem, item).await
    }

    async fn delete_featured_item(&self, id: Uuid) -> Result<()> {
        if self.get_featured_item(id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::FeaturedItem,
                id.to_string(),
            ));
        }
        self.delete_doc(id).await
    }

    async fn list_homepage_sections(&self) -> Result<Vec<HomepageSection>> {
        self.query(query::SECTIONS, QueryParams::new()).await
    }

    async fn get_homepage_section(&self, id: Uuid) -> Result<Option<HomepageSection>> {
        self.query(query::SECTION_BY_ID, QueryParams::new().set("id", id))
            .await
    }

    async fn create_homepage_section(&self, section: &HomepageSection) -> Result<()> {
        self.create_doc(ContentKind::HomepageSection, section).await
    }

    async fn update_homepage_section(&self, section: &HomepageSection) -> Result<()> {
        if self.get_homepage_section(section.id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::HomepageSection,
                section.id.to_string(),
            ));
        }
        self.replace_doc(ContentKind::HomepageSection, section)
            .await
    }

    async fn delete_homepage_section(&self, id: Uuid) -> Result<()> {
        if self.get_homepage_section(id).await?.is_none() {
            return Err(ContentError::not_found(
                ContentKind::HomepageSection,
                id.to_string(),
            ));
        }
        self.delete_doc(id).await
    }

    async fn replace_homepage_sections(&self, sections: &[HomepageSection]) -> Result<()> {
        let existing = self.list_homepage_sections().await?;
        let keep: HashSet<Uuid> = sections.iter().map(|s| s.id).collect();

        // The whole replacement is one mutations array, so the dataset
        // never holds a partial section list.
        let mut mutations = Vec::with_capacity(existing.len() + sections.len());
        for section in sections {
            mutations.push(json!({
                "createOrReplace": Self::typed_doc(ContentKind::HomepageSection, section)?
            }));
        }
        for stale in existing.iter().filter(|s| !keep.contains(&s.id)) {
            mutations.push(json!({ "delete": { "id": stale.id } }));
        }

        if mutations.is_empty() {
            return Ok(());
        }
        self.mutate(mutations).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_doc_stamps_the_kind() {
        let city = City::new("Sevilla", "sevilla");
        let value = HttpContentStore::typed_doc(ContentKind::City, &city).unwrap();

        assert_eq!(value["_type"], "city");
        assert_eq!(value["slug"], "sevilla");
        assert_eq!(value["title"], "Sevilla");
    }

    #[test]
    fn query_url_is_encoded() {
        let store = HttpContentStore::new("http://localhost:3333/", "production", None);

        assert_eq!(store.base_url, "http://localhost:3333");
        assert_eq!(store.dataset, "production");
    }

    #[test]
    fn query_response_envelope_deserializes() {
        let body = r#"{"result": [{"id": "7f2f4a10-57a1-4c43-a09e-0030f49d6a2b", "slug": "sevilla"}]}"#;
        let envelope: QueryResponse<Vec<SlugRef>> = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.result.len(), 1);
        assert_eq!(envelope.result[0].slug, "sevilla");
    }

    #[test]
    fn missing_single_document_is_null_result() {
        let body = r#"{"result": null}"#;
        let envelope: QueryResponse<Option<City>> = serde_json::from_str(body).unwrap();

        assert!(envelope.result.is_none());
    }
}
