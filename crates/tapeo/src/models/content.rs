use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use tapeo_core::content::{
    slugify, Category, City, FaqEntry, FeaturedItem, FeaturedTarget, GeoPoint, Guide,
    HomepageSection, PriceRange, Ratings, Recipe, Review, SectionKind, Venue,
};
use tapeo_core::serde::deserialize_optional_date;

/// The explicit slug when one was sent, otherwise derived from the
/// title.
fn resolve_slug(slug: Option<String>, title: &str) -> String {
    match slug {
        Some(slug) if !slug.trim().is_empty() => slug,
        _ => slugify(title),
    }
}

/// Request payload for creating a city.
#[derive(Debug, Deserialize)]
pub struct CreateCity {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
}

impl CreateCity {
    pub fn into_city(self) -> City {
        let slug = resolve_slug(self.slug, &self.title);
        let mut city = City::new(self.title, slug);
        if let Some(region) = self.region {
            city = city.with_region(region);
        }
        city.intro = self.intro;
        city
    }
}

/// Request payload for updating a city.
#[derive(Debug, Deserialize)]
pub struct UpdateCity {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
}

impl UpdateCity {
    /// Applies the update to an existing city.
    pub fn apply_to(self, city: &mut City) {
        if let Some(title) = self.title {
            city.title = title;
        }
        if let Some(slug) = self.slug {
            city.slug = slug;
        }
        if let Some(region) = self.region {
            city.region = Some(region);
        }
        if let Some(intro) = self.intro {
            city.intro = Some(intro);
        }
        city.updated_at = Utc::now();
    }
}

/// Request payload for creating a venue.
#[derive(Debug, Deserialize)]
pub struct CreateVenue {
    pub city_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub address: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub geo: Option<GeoPoint>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
}

impl CreateVenue {
    pub fn into_venue(self) -> Venue {
        let slug = resolve_slug(self.slug, &self.title);
        let mut venue = Venue::new(self.city_id, self.title, slug, self.address)
            .with_categories(self.category_ids);
        if let Some(geo) = self.geo {
            venue = venue.with_geo(geo);
        }
        if let Some(price_range) = self.price_range {
            venue = venue.with_price_range(price_range);
        }
        if let Some(phone) = self.phone {
            venue = venue.with_phone(phone);
        }
        if let Some(website) = self.website {
            venue = venue.with_website(website);
        }
        venue.summary = self.summary;
        venue
    }
}

/// Request payload for updating a venue.
#[derive(Debug, Deserialize)]
pub struct UpdateVenue {
    #[serde(default)]
    pub city_id: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub geo: Option<GeoPoint>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub category_ids: Option<Vec<Uuid>>,
}

impl UpdateVenue {
    pub fn apply_to(self, venue: &mut Venue) {
        if let Some(city_id) = self.city_id {
            venue.city_id = city_id;
        }
        if let Some(title) = self.title {
            venue.title = title;
        }
        if let Some(slug) = self.slug {
            venue.slug = slug;
        }
        if let Some(address) = self.address {
            venue.address = address;
        }
        if let Some(summary) = self.summary {
            venue.summary = Some(summary);
        }
        if let Some(geo) = self.geo {
            venue.geo = Some(geo);
        }
        if let Some(price_range) = self.price_range {
            venue.price_range = Some(price_range);
        }
        if let Some(phone) = self.phone {
            venue.phone = Some(phone);
        }
        if let Some(website) = self.website {
            venue.website = Some(website);
        }
        if let Some(category_ids) = self.category_ids {
            venue.category_ids = category_ids;
        }
        venue.updated_at = Utc::now();
    }
}

/// Request payload for creating a review.
///
/// `published: true` stamps `published_at` with the current time;
/// omitted or false creates a draft.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub venue_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub author: String,
    #[serde(default)]
    pub ratings: Option<Ratings>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<FaqEntry>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub published: bool,
}

impl CreateReview {
    pub fn into_review(self) -> Review {
        let slug = resolve_slug(self.slug, &self.title);
        let mut review =
            Review::new(self.venue_id, self.title, slug, self.author).with_faqs(self.faqs);
        if let Some(ratings) = self.ratings {
            review = review.with_ratings(ratings);
        }
        if let Some(body) = self.body {
            review = review.with_body(body);
        }
        if self.published {
            review = review.with_published_at(Utc::now());
        }
        review.summary = self.summary;
        review.tags = self.tags;
        review.visit_date = self.visit_date;
        review
    }
}

/// Request payload for updating a review.
#[derive(Debug, Deserialize)]
pub struct UpdateReview {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub ratings: Option<Ratings>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub faqs: Option<Vec<FaqEntry>>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub visit_date: Option<NaiveDate>,
    /// `true` publishes now (if not already published), `false`
    /// unpublishes, absent leaves the publication state alone.
    #[serde(default)]
    pub published: Option<bool>,
}

impl UpdateReview {
    pub fn apply_to(self, review: &mut Review) {
        if let Some(title) = self.title {
            review.title = title;
        }
        if let Some(slug) = self.slug {
            review.slug = slug;
        }
        if let Some(author) = self.author {
            review.author = author;
        }
        if let Some(ratings) = self.ratings {
            review.ratings = ratings;
        }
        if let Some(body) = self.body {
            review.body = body;
        }
        if let Some(summary) = self.summary {
            review.summary = Some(summary);
        }
        if let Some(tags) = self.tags {
            review.tags = tags;
        }
        if let Some(faqs) = self.faqs {
            review.faqs = faqs;
        }
        if let Some(visit_date) = self.visit_date {
            review.visit_date = Some(visit_date);
        }
        match self.published {
            Some(true) if !review.is_published() => review.published_at = Some(Utc::now()),
            Some(false) => review.published_at = None,
            _ => {}
        }
        review.updated_at = Utc::now();
    }
}

/// Request payload for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateCategory {
    pub fn into_category(self) -> Category {
        let slug = resolve_slug(self.slug, &self.title);
        let mut category = Category::new(self.title, slug);
        if let Some(description) = self.description {
            category = category.with_description(description);
        }
        category
    }
}

/// Request payload for updating a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateCategory {
    pub fn apply_to(self, category: &mut Category) {
        if let Some(title) = self.title {
            category.title = title;
        }
        if let Some(slug) = self.slug {
            category.slug = slug;
        }
        if let Some(description) = self.description {
            category.description = Some(description);
        }
        category.updated_at = Utc::now();
    }
}

/// Request payload for creating a guide.
#[derive(Debug, Deserialize)]
pub struct CreateGuide {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub body: String,
    #[serde(default)]
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub published: bool,
}

impl CreateGuide {
    pub fn into_guide(self) -> Guide {
        let slug = resolve_slug(self.slug, &self.title);
        let mut guide = Guide::new(self.title, slug, self.body);
        if let Some(recipe) = self.recipe {
            guide = guide.with_recipe(recipe);
        }
        if self.published {
            guide = guide.with_published_at(Utc::now());
        }
        guide.excerpt = self.excerpt;
        guide
    }
}

/// Request payload for updating a guide.
#[derive(Debug, Deserialize)]
pub struct UpdateGuide {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub published: Option<bool>,
}

impl UpdateGuide {
    pub fn apply_to(self, guide: &mut Guide) {
        if let Some(title) = self.title {
            guide.title = title;
        }
        if let Some(slug) = self.slug {
            guide.slug = slug;
        }
        if let Some(excerpt) = self.excerpt {
            guide.excerpt = Some(excerpt);
        }
        if let Some(body) = self.body {
            guide.body = body;
        }
        if let Some(recipe) = self.recipe {
            guide.recipe = Some(recipe);
        }
        match self.published {
            Some(true) if !guide.is_published() => guide.published_at = Some(Utc::now()),
            Some(false) => guide.published_at = None,
            _ => {}
        }
        guide.updated_at = Utc::now();
    }
}

/// Request payload for creating a featured homepage slot.
#[derive(Debug, Deserialize)]
pub struct CreateFeaturedItem {
    pub target: FeaturedTarget,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expire_at: Option<DateTime<Utc>>,
}

impl CreateFeaturedItem {
    pub fn into_featured_item(self) -> FeaturedItem {
        FeaturedItem::new(self.target)
            .with_position(self.position)
            .with_window(self.publish_at, self.expire_at)
    }
}

/// Request payload for updating a featured slot.
#[derive(Debug, Deserialize)]
pub struct UpdateFeaturedItem {
    #[serde(default)]
    pub target: Option<FeaturedTarget>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expire_at: Option<DateTime<Utc>>,
}

impl UpdateFeaturedItem {
    pub fn apply_to(self, item: &mut FeaturedItem) {
        if let Some(target) = self.target {
            item.target = target;
        }
        if let Some(position) = self.position {
            item.position = position;
        }
        if let Some(publish_at) = self.publish_at {
            item.publish_at = Some(publish_at);
        }
        if let Some(expire_at) = self.expire_at {
            item.expire_at = Some(expire_at);
        }
        item.updated_at = Utc::now();
    }
}

/// Request payload for creating a homepage section.
#[derive(Debug, Deserialize)]
pub struct CreateHomepageSection {
    pub kind: SectionKind,
    pub title: String,
    #[serde(default)]
    pub item_limit: Option<u32>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub position: Option<u32>,
}

impl CreateHomepageSection {
    pub fn into_section(self) -> HomepageSection {
        let mut section = HomepageSection::new(self.kind, self.title);
        if let Some(item_limit) = self.item_limit {
            section = section.with_item_limit(item_limit);
        }
        if let Some(enabled) = self.enabled {
            section = section.with_enabled(enabled);
        }
        if let Some(position) = self.position {
            section = section.with_position(position);
        }
        section
    }
}

/// Request payload for updating a homepage section.
#[derive(Debug, Deserialize)]
pub struct UpdateHomepageSection {
    #[serde(default)]
    pub kind: Option<SectionKind>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub item_limit: Option<u32>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub position: Option<u32>,
}

impl UpdateHomepageSection {
    pub fn apply_to(self, section: &mut HomepageSection) {
        if let Some(kind) = self.kind {
            section.kind = kind;
        }
        if let Some(title) = self.title {
            section.title = title;
        }
        if let Some(item_limit) = self.item_limit {
            section.item_limit = item_limit;
        }
        if let Some(enabled) = self.enabled {
            section.enabled = enabled;
        }
        if let Some(position) = self.position {
            section.position = position;
        }
        section.updated_at = Utc::now();
    }
}

/// One section of the bulk homepage layout update. Position comes from
/// the array order, not the payload.
#[derive(Debug, Deserialize)]
pub struct SectionUpsert {
    /// Present to keep an existing section's identity, absent to
    /// create a new one.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub kind: SectionKind,
    pub title: String,
    #[serde(default)]
    pub item_limit: Option<u32>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl SectionUpsert {
    pub fn into_section(self, position: u32) -> HomepageSection {
        let mut section = HomepageSection::new(self.kind, self.title).with_position(position);
        if let Some(id) = self.id {
            section = section.with_id(id);
        }
        if let Some(item_limit) = self.item_limit {
            section = section.with_item_limit(item_limit);
        }
        if let Some(enabled) = self.enabled {
            section = section.with_enabled(enabled);
        }
        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_city_derives_the_slug_from_the_title() {
        let request = CreateCity {
            title: "Cádiz".to_string(),
            slug: None,
            region: None,
            intro: None,
        };

        assert_eq!(request.into_city().slug, "cadiz");
    }

    #[test]
    fn create_venue_keeps_an_explicit_slug() {
        let request = CreateVenue {
            city_id: Uuid::new_v4(),
            title: "Casa Paco".to_string(),
            slug: Some("paco".to_string()),
            address: "Calle Sierpes 12".to_string(),
            summary: None,
            geo: None,
            price_range: None,
            phone: None,
            website: None,
            category_ids: vec![],
        };

        assert_eq!(request.into_venue().slug, "paco");
    }

    #[test]
    fn review_publish_flag_round_trips() {
        let venue_id = Uuid::new_v4();
        let create: CreateReview = serde_json::from_value(serde_json::json!({
            "venue_id": venue_id,
            "title": "Gran barra",
            "author": "Ana",
            "published": true,
        }))
        .unwrap();

        let mut review = create.into_review();
        assert!(review.is_published());
        assert_eq!(review.slug, "gran-barra");

        let unpublish: UpdateReview = serde_json::from_value(serde_json::json!({
            "published": false,
        }))
        .unwrap();
        unpublish.apply_to(&mut review);
        assert!(!review.is_published());
    }

    #[test]
    fn publishing_twice_keeps_the_first_stamp() {
        let create = CreateReview {
            venue_id: Uuid::new_v4(),
            title: "Gran barra".to_string(),
            slug: None,
            author: "Ana".to_string(),
            ratings: None,
            body: None,
            summary: None,
            tags: vec![],
            faqs: vec![],
            visit_date: None,
            published: true,
        };
        let mut review = create.into_review();
        let first_stamp = review.published_at;

        let update: UpdateReview = serde_json::from_value(serde_json::json!({
            "published": true,
            "title": "Gran barra, revisada",
        }))
        .unwrap();
        update.apply_to(&mut review);

        assert_eq!(review.published_at, first_stamp);
        assert_eq!(review.title, "Gran barra, revisada");
    }

    #[test]
    fn section_upsert_takes_position_from_the_caller() {
        let upsert: SectionUpsert = serde_json::from_value(serde_json::json!({
            "kind": "latestReviews",
            "title": "Últimas reseñas",
        }))
        .unwrap();

        let section = upsert.into_section(4);
        assert_eq!(section.position, 4);
        assert!(section.enabled);
    }
}
