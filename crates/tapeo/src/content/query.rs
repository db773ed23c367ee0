//! Query text and parameters for the content API.
//!
//! The content service speaks a GROQ-style query language: documents
//! are filtered on `_type` plus plain fields, parameters are passed as
//! `$name` query-string entries holding JSON-encoded values. All query
//! text lives here so the wire protocol is visible in one place.

use serde::Serialize;

// Cities
pub const CITIES: &str = r#"*[_type == "city"] | order(title asc)"#;
pub const CITY_BY_ID: &str = r#"*[_type == "city" && id == $id][0]"#;
pub const CITY_BY_SLUG: &str = r#"*[_type == "city" && slug == $slug][0]"#;
pub const CITY_SLUGS: &str = r#"*[_type == "city"]{id, slug}"#;
pub const COUNT_CITIES: &str = r#"count(*[_type == "city"])"#;

// Venues
pub const VENUES: &str = r#"*[_type == "venue"] | order(title asc)"#;
pub const VENUES_BY_CITY: &str =
    r#"*[_type == "venue" && city_id == $city_id] | order(title asc)"#;
pub const VENUE_BY_ID: &str = r#"*[_type == "venue" && id == $id][0]"#;
pub const VENUE_BY_SLUG: &str =
    r#"*[_type == "venue" && city_id == $city_id && slug == $slug][0]"#;
pub const VENUE_SLUGS: &str = r#"*[_type == "venue"]{id, slug, city_id}"#;
pub const VENUE_STAMP_FIELDS: &str = r#"*[_type == "venue"]{slug, city_id, updated_at}"#;
pub const COUNT_VENUES: &str = r#"count(*[_type == "venue"])"#;
pub const COUNT_VENUES_IN_CITY: &str = r#"count(*[_type == "venue" && city_id == $city_id])"#;
pub const COUNT_VENUES_WITH_CATEGORY: &str =
    r#"count(*[_type == "venue" && $category_id in category_ids])"#;

// Reviews
pub const REVIEWS: &str = r#"*[_type == "review"] | order(updated_at desc)"#;
pub const REVIEWS_BY_VENUE: &str =
    r#"*[_type == "review" && venue_id == $venue_id] | order(updated_at desc)"#;
pub const RECENT_REVIEWS: &str =
    r#"*[_type == "review" && defined(published_at)] | order(published_at desc) [0...$limit]"#;
pub const REVIEW_BY_ID: &str = r#"*[_type == "review" && id == $id][0]"#;
pub const REVIEW_BY_SLUG: &str =
    r#"*[_type == "review" && venue_id == $venue_id && slug == $slug][0]"#;
pub const REVIEW_STAMP_FIELDS: &str =
    r#"*[_type == "review" && defined(published_at)]{slug, venue_id, published_at, updated_at}"#;
pub const COUNT_REVIEWS: &str = r#"count(*[_type == "review"])"#;
pub const COUNT_REVIEWS_FOR_VENUE: &str =
    r#"count(*[_type == "review" && venue_id == $venue_id])"#;

// Categories
pub const CATEGORIES: &str = r#"*[_type == "category"] | order(title asc)"#;
pub const CATEGORY_BY_ID: &str = r#"*[_type == "category" && id == $id][0]"#;
pub const CATEGORY_BY_SLUG: &str = r#"*[_type == "category" && slug == $slug][0]"#;
pub const COUNT_CATEGORIES: &str = r#"count(*[_type == "category"])"#;

// Guides
pub const GUIDES: &str = r#"*[_type == "guide"] | order(updated_at desc)"#;
pub const PUBLISHED_GUIDES: &str =
    r#"*[_type == "guide" && defined(published_at)] | order(published_at desc)"#;
pub const GUIDE_BY_ID: &str = r#"*[_type == "guide" && id == $id][0]"#;
pub const GUIDE_BY_SLUG: &str = r#"*[_type == "guide" && slug == $slug][0]"#;
pub const GUIDE_STAMPS: &str =
    r#"*[_type == "guide" && defined(published_at)]{slug, published_at, updated_at}"#;
pub const COUNT_GUIDES: &str = r#"count(*[_type == "guide"])"#;

// QR codes and feedback
pub const QR_CODES: &str = r#"*[_type == "qrCode"] | order(updated_at desc)"#;
pub const QR_CODES_BY_VENUE: &str =
    r#"*[_type == "qrCode" && venue_id == $venue_id] | order(updated_at desc)"#;
pub const QR_BY_ID: &str = r#"*[_type == "qrCode" && id == $id][0]"#;
pub const QR_BY_CODE: &str = r#"*[_type == "qrCode" && code == $code][0]"#;
pub const COUNT_QR_FOR_VENUE: &str =
    r#"count(*[_type == "qrCode" && venue_id == $venue_id])"#;
pub const FEEDBACK: &str = r#"*[_type == "qrFeedback"] | order(created_at desc)"#;
pub const FEEDBACK_BY_STATUS: &str =
    r#"*[_type == "qrFeedback" && status == $status] | order(created_at desc)"#;
pub const FEEDBACK_BY_ID: &str = r#"*[_type == "qrFeedback" && id == $id][0]"#;
pub const COUNT_PENDING_FEEDBACK: &str =
    r#"count(*[_type == "qrFeedback" && status == "pending"])"#;

// Curation
pub const FEATURED_ITEMS: &str = r#"*[_type == "featuredItem"] | order(position asc)"#;
pub const FEATURED_BY_ID: &str = r#"*[_type == "featuredItem" && id == $id][0]"#;
pub const SECTIONS: &str = r#"*[_type == "homepageSection"] | order(position asc)"#;
pub const SECTION_BY_ID: &str = r#"*[_type == "homepageSection" && id == $id][0]"#;

/// Named query parameters, encoded as `$name=<json>` query-string
/// entries the way the content API expects them.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, serde_json::Value)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter. Values that fail JSON encoding become `null`,
    /// which the API then reports as a bad query.
    pub fn set(mut self, name: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        self.0.push((name.to_string(), value));
        self
    }

    /// Encode as query-string fragments: `$id=%22...%22&$slug=%22...%22`.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| {
                format!("${}={}", name, urlencoding::encode(&value.to_string()))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn params_encode_as_json_values() {
        let params = QueryParams::new().set("slug", "casa-paco").set("limit", 6);

        assert_eq!(params.encode(), "$slug=%22casa-paco%22&$limit=6");
    }

    #[test]
    fn uuid_params_encode_as_strings() {
        let id = Uuid::nil();
        let params = QueryParams::new().set("id", id);

        assert_eq!(
            params.encode(),
            "$id=%2200000000-0000-0000-0000-000000000000%22"
        );
    }

    #[test]
    fn empty_params_encode_to_nothing() {
        let params = QueryParams::new();
        assert!(params.is_empty());
        assert_eq!(params.encode(), "");
    }
}
