use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::content::{
    Category, City, FeaturedItem, Guide, HomepageSection, Review, Venue,
};
use crate::qr::{FeedbackStatus, QrCode, QrFeedback};

use super::{GuideStamp, Result, ReviewStamp, VenueStamp};

/// Repository for city documents.
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// All cities, ordered by title.
    async fn list_cities(&self) -> Result<Vec<City>>;

    /// Gets a city by its ID.
    async fn get_city(&self, id: Uuid) -> Result<Option<City>>;

    /// Gets a city by its slug.
    async fn find_city_by_slug(&self, slug: &str) -> Result<Option<City>>;

    /// Creates a new city.
    async fn create_city(&self, city: &City) -> Result<()>;

    /// Updates an existing city.
    async fn update_city(&self, city: &City) -> Result<()>;

    /// Deletes a city by its ID.
    async fn delete_city(&self, id: Uuid) -> Result<()>;

    async fn count_cities(&self) -> Result<u64>;
}

/// Repository for venue documents.
#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Venues, optionally restricted to one city, ordered by title.
    async fn list_venues(&self, city_id: Option<Uuid>) -> Result<Vec<Venue>>;

    /// Gets a venue by its ID.
    async fn get_venue(&self, id: Uuid) -> Result<Option<Venue>>;

    /// Gets a venue by its slug within a city. Venue slugs are only
    /// unique per city.
    async fn find_venue_by_slug(&self, city_id: Uuid, slug: &str) -> Result<Option<Venue>>;

    /// Creates a new venue.
    async fn create_venue(&self, venue: &Venue) -> Result<()>;

    /// Updates an existing venue.
    async fn update_venue(&self, venue: &Venue) -> Result<()>;

    /// Deletes a venue by its ID.
    async fn delete_venue(&self, id: Uuid) -> Result<()>;

    async fn count_venues(&self) -> Result<u64>;

    /// How many venues belong to a city. Used to block city deletion.
    async fn count_venues_in_city(&self, city_id: Uuid) -> Result<u64>;

    /// How many venues reference a category. Used to block category
    /// deletion.
    async fn count_venues_with_category(&self, category_id: Uuid) -> Result<u64>;

    /// Slug projections of every venue, for the sitemap.
    async fn venue_stamps(&self) -> Result<Vec<VenueStamp>>;
}

/// Repository for review documents.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews, optionally restricted to one venue, newest first.
    async fn list_reviews(&self, venue_id: Option<Uuid>) -> Result<Vec<Review>>;

    /// The most recent published reviews, newest first.
    async fn list_recent_reviews(&self, limit: u32) -> Result<Vec<Review>>;

    /// Gets a review by its ID.
    async fn get_review(&self, id: Uuid) -> Result<Option<Review>>;

    /// Gets a review by its slug within a venue.
    async fn find_review_by_slug(&self, venue_id: Uuid, slug: &str) -> Result<Option<Review>>;

    /// Creates a new review.
    async fn create_review(&self, review: &Review) -> Result<()>;

    /// Updates an existing review.
    async fn update_review(&self, review: &Review) -> Result<()>;

    /// Deletes a review by its ID.
    async fn delete_review(&self, id: Uuid) -> Result<()>;

    async fn count_reviews(&self) -> Result<u64>;

    /// How many reviews a venue has. Used to block venue deletion.
    async fn count_reviews_for_venue(&self, venue_id: Uuid) -> Result<u64>;

    /// Slug projections of every published review, for the sitemap.
    async fn review_stamps(&self) -> Result<Vec<ReviewStamp>>;
}

/// Repository for category documents.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, ordered by title.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Gets a category by its ID.
    async fn get_category(&self, id: Uuid) -> Result<Option<Category>>;

    /// Gets a category by its slug.
    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;

    /// Creates a new category.
    async fn create_category(&self, category: &Category) -> Result<()>;

    /// Updates an existing category.
    async fn update_category(&self, category: &Category) -> Result<()>;

    /// Deletes a category by its ID.
    async fn delete_category(&self, id: Uuid) -> Result<()>;

    async fn count_categories(&self) -> Result<u64>;
}

/// Repository for guide documents.
#[async_trait]
pub trait GuideRepository: Send + Sync {
    /// All guides including drafts, newest first. Admin listing.
    async fn list_guides(&self) -> Result<Vec<Guide>>;

    /// Published guides only, newest first. Public listing.
    async fn list_published_guides(&self) -> Result<Vec<Guide>>;

    /// Gets a guide by its ID.
    async fn get_guide(&self, id: Uuid) -> Result<Option<Guide>>;

    /// Gets a guide by its slug.
    async fn find_guide_by_slug(&self, slug: &str) -> Result<Option<Guide>>;

    /// Creates a new guide.
    async fn create_guide(&self, guide: &Guide) -> Result<()>;

    /// Updates an existing guide.
    async fn update_guide(&self, guide: &Guide) -> Result<()>;

    /// Deletes a guide by its ID.
    async fn delete_guide(&self, id: Uuid) -> Result<()>;

    async fn count_guides(&self) -> Result<u64>;

    /// Slug projections of every published guide, for the sitemap.
    async fn guide_stamps(&self) -> Result<Vec<GuideStamp>>;
}

/// Repository for QR codes and the feedback visitors leave through
/// them.
#[async_trait]
pub trait QrRepository: Send + Sync {
    /// QR codes, optionally restricted to one venue, newest first.
    async fn list_qr_codes(&self, venue_id: Option<Uuid>) -> Result<Vec<QrCode>>;

    /// Gets a QR code by its ID.
    async fn get_qr_code(&self, id: Uuid) -> Result<Option<QrCode>>;

    /// Gets a QR code by its scan code string.
    async fn find_qr_code(&self, code: &str) -> Result<Option<QrCode>>;

    /// Creates a new QR code.
    async fn create_qr_code(&self, qr_code: &QrCode) -> Result<()>;

    /// Updates an existing QR code.
    async fn update_qr_code(&self, qr_code: &QrCode) -> Result<()>;

    /// Deletes a QR code by its ID.
    async fn delete_qr_code(&self, id: Uuid) -> Result<()>;

    /// Records a successful scan: bumps the usage counter and stamps
    /// the last-used time.
    async fn record_qr_use(&self, id: Uuid, at: DateTime<Utc>) -> Result<()>;

    /// How many QR codes a venue has. Used to block venue deletion.
    async fn count_qr_codes_for_venue(&self, venue_id: Uuid) -> Result<u64>;

    /// Stores a new feedback entry.
    async fn create_feedback(&self, feedback: &QrFeedback) -> Result<()>;

    /// Feedback entries, optionally filtered by status, newest first.
    async fn list_feedback(&self, status: Option<FeedbackStatus>) -> Result<Vec<QrFeedback>>;

    /// Gets a feedback entry by its ID.
    async fn get_feedback(&self, id: Uuid) -> Result<Option<QrFeedback>>;

    /// Moves a feedback entry to a new moderation status.
    async fn set_feedback_status(&self, id: Uuid, status: FeedbackStatus) -> Result<()>;

    async fn count_pending_feedback(&self) -> Result<u64>;
}

/// Repository for homepage curation: featured slots and section
/// layout.
#[async_trait]
pub trait CurationRepository: Send + Sync {
    /// All featured slots including scheduled and expired ones, ordered
    /// by position. Admin listing; the homepage filters by window.
    async fn list_featured_items(&self) -> Result<Vec<FeaturedItem>>;

    /// Gets a featured slot by its ID.
    async fn get_featured_item(&self, id: Uuid) -> Result<Option<FeaturedItem>>;

    /// Creates a new featured slot.
    async fn create_featured_item(&self, item: &FeaturedItem) -> Result<()>;

    /// Updates an existing featured slot.
    async fn update_featured_item(&self, item: &FeaturedItem) -> Result<()>;

    /// Deletes a featured slot by its ID.
    async fn delete_featured_item(&self, id: Uuid) -> Result<()>;

    /// All homepage sections, ordered by position.
    async fn list_homepage_sections(&self) -> Result<Vec<HomepageSection>>;

    /// Gets a homepage section by its ID.
    async fn get_homepage_section(&self, id: Uuid) -> Result<Option<HomepageSection>>;

    /// Creates a new homepage section.
    async fn create_homepage_section(&self, section: &HomepageSection) -> Result<()>;

    /// Updates an existing homepage section.
    async fn update_homepage_section(&self, section: &HomepageSection) -> Result<()>;

    /// Deletes a homepage section by its ID.
    async fn delete_homepage_section(&self, id: Uuid) -> Result<()>;

    /// Saves a full section layout in one operation. Used by the
    /// drag-to-reorder admin screen, which submits every section at
    /// once.
    async fn replace_homepage_sections(&self, sections: &[HomepageSection]) -> Result<()>;
}

/// Everything the server needs from a content store in one bound.
pub trait ContentStore:
    CityRepository
    + VenueRepository
    + ReviewRepository
    + CategoryRepository
    + GuideRepository
    + QrRepository
    + CurationRepository
{
}

impl<T> ContentStore for T where
    T: CityRepository
        + VenueRepository
        + ReviewRepository
        + CategoryRepository
        + GuideRepository
        + QrRepository
        + CurationRepository
{
}
