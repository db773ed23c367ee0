//! Bulk content seeding from a JSON file.
//!
//! Documents reference each other by slug in the file; the run
//! resolves those to IDs against the server as it goes. Seeding is
//! idempotent: a document whose slug already exists is skipped, so the
//! same file can be applied after every deploy.

use std::collections::HashMap;

use chrono::NaiveDate;
use tapeo_core::content::{slugify, GeoPoint, PriceRange, Ratings};
use uuid::Uuid;

use super::categories::CreateCategoryRequest;
use super::cities::CreateCityRequest;
use super::guides::CreateGuideRequest;
use super::reviews::CreateReviewRequest;
use super::venues::CreateVenueRequest;
use super::TapeoClient;
use crate::error::{ClientError, Result};

/// A seed file: documents keyed by kind.
#[derive(Debug, Default, serde::Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub categories: Vec<CreateCategoryRequest>,
    #[serde(default)]
    pub cities: Vec<CreateCityRequest>,
    #[serde(default)]
    pub venues: Vec<SeedVenue>,
    #[serde(default)]
    pub reviews: Vec<SeedReview>,
    #[serde(default)]
    pub guides: Vec<CreateGuideRequest>,
}

/// A venue in a seed file, referencing its city and categories by slug.
#[derive(Debug, serde::Deserialize)]
pub struct SeedVenue {
    pub city: String,
    pub title: String,
    pub slug: Option<String>,
    pub address: String,
    pub summary: Option<String>,
    pub geo: Option<GeoPoint>,
    pub price_range: Option<PriceRange>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A review in a seed file, referencing its venue by slug.
#[derive(Debug, serde::Deserialize)]
pub struct SeedReview {
    pub venue: String,
    pub title: String,
    pub slug: Option<String>,
    pub author: String,
    pub ratings: Option<Ratings>,
    pub body: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub published: bool,
}

/// How many documents a seed run created, per kind.
#[derive(Debug, Default, serde::Serialize)]
pub struct SeedReport {
    pub categories: usize,
    pub cities: usize,
    pub venues: usize,
    pub reviews: usize,
    pub guides: usize,
    pub skipped: usize,
}

/// The slug a document will get: the explicit one, or derived from the
/// title the same way the server derives it.
fn seed_slug(slug: &Option<String>, title: &str) -> String {
    match slug {
        Some(slug) if !slug.trim().is_empty() => slug.clone(),
        _ => slugify(title),
    }
}

impl TapeoClient {
    /// Apply a seed file: categories and cities first, then venues,
    /// reviews and guides.
    pub async fn apply_seed(&self, seed: SeedFile) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        // Existing documents count for slug references and skips.
        let mut category_ids: HashMap<String, Uuid> = self
            .list_categories()
            .await?
            .into_iter()
            .map(|c| (c.slug, c.id))
            .collect();
        let mut city_ids: HashMap<String, Uuid> = self
            .list_cities()
            .await?
            .into_iter()
            .map(|c| (c.slug, c.id))
            .collect();
        let mut venue_ids: HashMap<String, Uuid> = self
            .list_venues(None)
            .await?
            .into_iter()
            .map(|v| (v.slug, v.id))
            .collect();

        for request in seed.categories {
            let slug = seed_slug(&request.slug, &request.title);
            if category_ids.contains_key(&slug) {
                report.skipped += 1;
                continue;
            }
            let category = self.create_category(request).await?;
            category_ids.insert(category.slug, category.id);
            report.categories += 1;
        }

        for request in seed.cities {
            let slug = seed_slug(&request.slug, &request.title);
            if city_ids.contains_key(&slug) {
                report.skipped += 1;
                continue;
            }
            let city = self.create_city(request).await?;
            city_ids.insert(city.slug, city.id);
            report.cities += 1;
        }

        for venue in seed.venues {
            let slug = seed_slug(&venue.slug, &venue.title);
            if venue_ids.contains_key(&slug) {
                report.skipped += 1;
                continue;
            }
            let city_id = *city_ids.get(&venue.city).ok_or_else(|| {
                ClientError::InvalidInput(format!("unknown city slug `{}`", venue.city))
            })?;
            let mut ids = Vec::with_capacity(venue.categories.len());
            for category_slug in &venue.categories {
                let id = category_ids.get(category_slug).ok_or_else(|| {
                    ClientError::InvalidInput(format!("unknown category slug `{category_slug}`"))
                })?;
                ids.push(*id);
            }
            let created = self
                .create_venue(CreateVenueRequest {
                    city_id,
                    title: venue.title,
                    slug: venue.slug,
                    address: venue.address,
                    summary: venue.summary,
                    geo: venue.geo,
                    price_range: venue.price_range,
                    phone: venue.phone,
                    website: venue.website,
                    category_ids: ids,
                })
                .await?;
            venue_ids.insert(created.slug, created.id);
            report.venues += 1;
        }

        if !seed.reviews.is_empty() {
            let existing: HashMap<(Uuid, String), ()> = self
                .list_reviews(None)
                .await?
                .into_iter()
                .map(|r| ((r.venue_id, r.slug), ()))
                .collect();

            for review in seed.reviews {
                let venue_id = *venue_ids.get(&review.venue).ok_or_else(|| {
                    ClientError::InvalidInput(format!("unknown venue slug `{}`", review.venue))
                })?;
                let slug = seed_slug(&review.slug, &review.title);
                if existing.contains_key(&(venue_id, slug)) {
                    report.skipped += 1;
                    continue;
                }
                self.create_review(CreateReviewRequest {
                    venue_id,
                    title: review.title,
                    slug: review.slug,
                    author: review.author,
                    ratings: review.ratings,
                    body: review.body,
                    summary: review.summary,
                    tags: review.tags,
                    visit_date: review.visit_date,
                    published: review.published,
                })
                .await?;
                report.reviews += 1;
            }
        }

        if !seed.guides.is_empty() {
            let existing: HashMap<String, ()> = self
                .list_guides()
                .await?
                .into_iter()
                .map(|g| (g.slug, ()))
                .collect();

            for request in seed.guides {
                let slug = seed_slug(&request.slug, &request.title);
                if existing.contains_key(&slug) {
                    report.skipped += 1;
                    continue;
                }
                self.create_guide(request).await?;
                report.guides += 1;
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_file_parses_with_slug_references() {
        let file: SeedFile = serde_json::from_str(
            r#"{
                "cities": [{"title": "Sevilla"}],
                "categories": [{"title": "Tabernas clásicas"}],
                "venues": [{
                    "city": "sevilla",
                    "title": "Casa Paco",
                    "address": "Calle Sierpes 12",
                    "price_range": "€€",
                    "categories": ["tabernas-clasicas"]
                }],
                "reviews": [{
                    "venue": "casa-paco",
                    "title": "Tapas de otoño",
                    "author": "Marta",
                    "ratings": {"food": 8.5, "service": 7.0, "ambience": 8.0, "value": 9.0},
                    "published": true
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(file.cities.len(), 1);
        assert_eq!(file.venues[0].categories, vec!["tabernas-clasicas"]);
        assert_eq!(file.reviews[0].venue, "casa-paco");
        assert!(file.guides.is_empty());
    }

    #[test]
    fn seed_slug_derives_from_title() {
        assert_eq!(seed_slug(&None, "Casa Paco"), "casa-paco");
        assert_eq!(
            seed_slug(&Some("la-casa".to_string()), "Casa Paco"),
            "la-casa"
        );
        assert_eq!(seed_slug(&Some("  ".to_string()), "Casa Paco"), "casa-paco");
    }
}
