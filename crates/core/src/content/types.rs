use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::ContentError;
use crate::validation::{url_error_message, validate_phone};

use super::rating::Ratings;
use super::slug::is_valid_slug;

/// WGS84 coordinates for a venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lng) {
            return Err(ContentError::InvalidData(format!(
                "Coordenadas fuera de rango: {}, {}",
                self.lat, self.lng
            )));
        }
        Ok(())
    }
}

/// Venue price bracket, serialized as the euro symbols shown on site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "€")]
    Budget,
    #[serde(rename = "€€")]
    Moderate,
    #[serde(rename = "€€€")]
    Premium,
    #[serde(rename = "€€€€")]
    Luxury,
}

impl PriceRange {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Budget => "€",
            Self::Moderate => "€€",
            Self::Premium => "€€€",
            Self::Luxury => "€€€€",
        }
    }
}

impl std::fmt::Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A city the guide covers. Venues hang off cities, so city slugs form
/// the first segment of every venue URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl City {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: slug.into(),
            region: None,
            intro: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::MissingField { field: "title" });
        }
        validate_slug_field(&self.slug)
    }
}

/// A restaurant, bar or tapas place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub city_id: Uuid,
    pub title: String,
    /// Unique within the venue's city, not globally.
    pub slug: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl Venue {
    pub fn new(
        city_id: Uuid,
        title: impl Into<String>,
        slug: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            city_id,
            title: title.into(),
            slug: slug.into(),
            address: address.into(),
            summary: None,
            geo: None,
            price_range: None,
            phone: None,
            website: None,
            category_ids: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = Some(price_range);
        self
    }

    pub fn with_geo(mut self, geo: GeoPoint) -> Self {
        self.geo = Some(geo);
        self
    }

    pub fn with_categories(mut self, category_ids: Vec<Uuid>) -> Self {
        self.category_ids = category_ids;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::MissingField { field: "title" });
        }
        if self.address.trim().is_empty() {
            return Err(ContentError::MissingField { field: "address" });
        }
        validate_slug_field(&self.slug)?;
        if let Some(phone) = &self.phone {
            let check = validate_phone(phone);
            if !check.is_valid {
                return Err(ContentError::InvalidData(
                    check.error.unwrap_or_else(|| "Teléfono no válido".to_string()),
                ));
            }
        }
        if let Some(website) = &self.website {
            if let Some(message) = url_error_message(website) {
                return Err(ContentError::InvalidData(message));
            }
        }
        if let Some(geo) = &self.geo {
            geo.validate()?;
        }
        Ok(())
    }
}

/// Frequently asked question shown on a review page and exported as
/// FAQPage structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// An editorial review of a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub title: String,
    /// Unique within the venue.
    pub slug: String,
    pub author: String,
    pub ratings: Ratings,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<FaqEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<NaiveDate>,
    /// Unset while the review is a draft.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        venue_id: Uuid,
        title: impl Into<String>,
        slug: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            venue_id,
            title: title.into(),
            slug: slug.into(),
            author: author.into(),
            ratings: Ratings::default(),
            body: String::new(),
            summary: None,
            tags: Vec::new(),
            faqs: Vec::new(),
            visit_date: None,
            published_at: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_ratings(mut self, ratings: Ratings) -> Self {
        self.ratings = ratings;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_faqs(mut self, faqs: Vec<FaqEntry>) -> Self {
        self.faqs = faqs;
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::MissingField { field: "title" });
        }
        if self.author.trim().is_empty() {
            return Err(ContentError::MissingField { field: "author" });
        }
        validate_slug_field(&self.slug)?;
        if !self.ratings.is_within_scale() {
            return Err(ContentError::InvalidData(
                "Las puntuaciones deben estar entre 0 y 10".to_string(),
            ));
        }
        Ok(())
    }
}

/// A cuisine or venue-type grouping, e.g. "marisquerías".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: slug.into(),
            description: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::MissingField { field: "title" });
        }
        validate_slug_field(&self.slug)
    }
}

/// Structured how-to attached to a guide, rendered as Recipe JSON-LD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl Recipe {
    pub fn total_minutes(&self) -> Option<u32> {
        match (self.prep_minutes, self.cook_minutes) {
            (None, None) => None,
            (prep, cook) => Some(prep.unwrap_or(0) + cook.unwrap_or(0)),
        }
    }
}

/// A long-form editorial article, optionally carrying a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Guide {
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: slug.into(),
            excerpt: None,
            body: body.into(),
            recipe: None,
            published_at: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.recipe = Some(recipe);
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::MissingField { field: "title" });
        }
        if self.body.trim().is_empty() {
            return Err(ContentError::MissingField { field: "body" });
        }
        validate_slug_field(&self.slug)
    }
}

fn validate_slug_field(slug: &str) -> Result<(), ContentError> {
    if slug.trim().is_empty() {
        return Err(ContentError::MissingField { field: "slug" });
    }
    if !is_valid_slug(slug) {
        return Err(ContentError::InvalidData(format!(
            "Slug no válido: {slug}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue() -> Venue {
        Venue::new(
            Uuid::new_v4(),
            "La Tasca",
            "la-tasca",
            "Calle Mayor 1, Madrid",
        )
    }

    #[test]
    fn test_city_validate_requires_title() {
        let city = City::new("", "madrid");
        assert_eq!(
            city.validate(),
            Err(ContentError::MissingField { field: "title" })
        );
    }

    #[test]
    fn test_city_validate_rejects_bad_slug() {
        let city = City::new("Madrid", "Madrid");
        assert!(matches!(
            city.validate(),
            Err(ContentError::InvalidData(_))
        ));
    }

    #[test]
    fn test_venue_validate_ok() {
        assert!(venue().validate().is_ok());
    }

    #[test]
    fn test_venue_validate_requires_address() {
        let v = Venue::new(Uuid::new_v4(), "La Tasca", "la-tasca", "   ");
        assert_eq!(
            v.validate(),
            Err(ContentError::MissingField { field: "address" })
        );
    }

    #[test]
    fn test_venue_validate_checks_phone() {
        let v = venue().with_phone("12345");
        assert_eq!(
            v.validate(),
            Err(ContentError::InvalidData(
                "Formato de teléfono no válido. Ej: 612 345 678 o +34 612 345 678".to_string()
            ))
        );
    }

    #[test]
    fn test_venue_validate_checks_website() {
        let v = venue().with_website("example.com");
        assert_eq!(
            v.validate(),
            Err(ContentError::InvalidData(
                "La URL debe comenzar con http:// o https://".to_string()
            ))
        );
    }

    #[test]
    fn test_venue_validate_accepts_contact_fields() {
        let v = venue()
            .with_phone("+34 612 345 678")
            .with_website("https://latasca.example.com");
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_geo_point_range() {
        assert!(GeoPoint::new(40.4168, -3.7038).validate().is_ok());
        assert!(GeoPoint::new(91.0, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, -181.0).validate().is_err());
    }

    #[test]
    fn test_price_range_serializes_as_symbols() {
        assert_eq!(
            serde_json::to_string(&PriceRange::Moderate).unwrap(),
            "\"€€\""
        );
        let parsed: PriceRange = serde_json::from_str("\"€€€€\"").unwrap();
        assert_eq!(parsed, PriceRange::Luxury);
        assert_eq!(PriceRange::Budget.to_string(), "€");
    }

    #[test]
    fn test_review_validate_checks_scale() {
        let review = Review::new(Uuid::new_v4(), "Gran marisco", "gran-marisco", "Ana")
            .with_ratings(Ratings::new(11.0, 5.0, 5.0, 5.0));
        assert!(matches!(
            review.validate(),
            Err(ContentError::InvalidData(_))
        ));
    }

    #[test]
    fn test_review_published_flag() {
        let draft = Review::new(Uuid::new_v4(), "Borrador", "borrador", "Ana");
        assert!(!draft.is_published());
        assert!(draft.with_published_at(Utc::now()).is_published());
    }

    #[test]
    fn test_guide_validate_requires_body() {
        let guide = Guide::new("Ruta del vermut", "ruta-del-vermut", "");
        assert_eq!(
            guide.validate(),
            Err(ContentError::MissingField { field: "body" })
        );
    }

    #[test]
    fn test_recipe_total_minutes() {
        let recipe = Recipe {
            name: "Tortilla".to_string(),
            description: None,
            prep_minutes: Some(15),
            cook_minutes: Some(25),
            servings: None,
            ingredients: vec![],
            steps: vec![],
        };
        assert_eq!(recipe.total_minutes(), Some(40));

        let bare = Recipe {
            name: "Pan con tomate".to_string(),
            description: None,
            prep_minutes: None,
            cook_minutes: None,
            servings: None,
            ingredients: vec![],
            steps: vec![],
        };
        assert_eq!(bare.total_minutes(), None);
    }

    #[test]
    fn test_venue_serde_round_trip() {
        let v = venue()
            .with_geo(GeoPoint::new(40.4168, -3.7038))
            .with_price_range(PriceRange::Moderate)
            .with_categories(vec![Uuid::new_v4()]);
        let json = serde_json::to_string(&v).unwrap();
        let back: Venue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
