//! Pure functions for building cache keys and invalidation tags.
//!
//! Keys identify one cached value; tags group values that must be
//! flushed together when content changes. Both are plain strings so
//! cache implementations stay oblivious to the domain.

use uuid::Uuid;

use crate::content::ContentKind;

/// Tag carried by every cached value the homepage is assembled from.
pub const HOMEPAGE_TAG: &str = "homepage";

/// Tag carried by the cached sitemap projections.
pub const SITEMAP_TAG: &str = "sitemap";

/// Tag covering every cached value derived from one document kind.
pub fn kind_tag(kind: ContentKind) -> String {
    format!("kind:{}", kind.type_name())
}

/// Key and tag for a single document.
pub fn doc_key(kind: ContentKind, id: Uuid) -> String {
    format!("{}:{}", kind.type_name(), id)
}

pub fn city_slug_key(slug: &str) -> String {
    format!("city:slug:{slug}")
}

/// Venue slugs are only unique per city, so the key carries the city.
pub fn venue_slug_key(city_id: Uuid, slug: &str) -> String {
    format!("venue:slug:{city_id}:{slug}")
}

pub fn review_slug_key(venue_id: Uuid, slug: &str) -> String {
    format!("review:slug:{venue_id}:{slug}")
}

pub fn category_slug_key(slug: &str) -> String {
    format!("category:slug:{slug}")
}

pub fn guide_slug_key(slug: &str) -> String {
    format!("guide:slug:{slug}")
}

pub fn qr_code_key(code: &str) -> String {
    format!("qr:code:{code}")
}

pub fn cities_key() -> String {
    "cities:all".to_string()
}

pub fn venues_key(city_id: Option<Uuid>) -> String {
    match city_id {
        Some(city_id) => format!("venues:city:{city_id}"),
        None => "venues:all".to_string(),
    }
}

pub fn reviews_key(venue_id: Option<Uuid>) -> String {
    match venue_id {
        Some(venue_id) => format!("reviews:venue:{venue_id}"),
        None => "reviews:all".to_string(),
    }
}

pub fn recent_reviews_key(limit: u32) -> String {
    format!("reviews:recent:{limit}")
}

pub fn categories_key() -> String {
    "categories:all".to_string()
}

pub fn guides_key(published_only: bool) -> String {
    if published_only {
        "guides:published".to_string()
    } else {
        "guides:all".to_string()
    }
}

pub fn featured_key() -> String {
    "featured:all".to_string()
}

pub fn sections_key() -> String {
    "sections:all".to_string()
}

/// Key for the cached sitemap projection of one document kind.
pub fn stamps_key(kind: ContentKind) -> String {
    format!("sitemap:stamps:{}", kind.type_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_id() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap()
    }

    #[test]
    fn test_doc_key_format() {
        assert_eq!(
            doc_key(ContentKind::Venue, test_id()),
            "venue:550e8400-e29b-41d4-a716-446655440000"
        );
        assert_eq!(
            doc_key(ContentKind::QrCode, test_id()),
            "qrCode:550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_kind_tag_format() {
        assert_eq!(kind_tag(ContentKind::Review), "kind:review");
        assert_eq!(kind_tag(ContentKind::HomepageSection), "kind:homepageSection");
    }

    #[test]
    fn test_venue_slug_key_is_scoped_by_city() {
        let madrid = test_id();
        let sevilla = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
        assert_ne!(
            venue_slug_key(madrid, "la-tasca"),
            venue_slug_key(sevilla, "la-tasca")
        );
    }

    #[test]
    fn test_list_keys_vary_by_filter() {
        assert_eq!(venues_key(None), "venues:all");
        assert_eq!(
            venues_key(Some(test_id())),
            "venues:city:550e8400-e29b-41d4-a716-446655440000"
        );
        assert_ne!(reviews_key(None), reviews_key(Some(test_id())));
    }

    #[test]
    fn test_recent_reviews_key_varies_by_limit() {
        assert_ne!(recent_reviews_key(6), recent_reviews_key(12));
    }

    #[test]
    fn test_guides_keys() {
        assert_eq!(guides_key(true), "guides:published");
        assert_eq!(guides_key(false), "guides:all");
    }

    #[test]
    fn test_qr_code_key_format() {
        assert_eq!(qr_code_key("K9ZR1T3M4A2B"), "qr:code:K9ZR1T3M4A2B");
    }

    #[test]
    fn test_stamps_key_format() {
        assert_eq!(stamps_key(ContentKind::Guide), "sitemap:stamps:guide");
    }
}
