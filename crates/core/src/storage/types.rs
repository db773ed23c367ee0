use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal venue projection used by sitemap generation: enough to build
/// the public URL plus the last modification time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueStamp {
    pub slug: String,
    pub city_slug: String,
    pub updated_at: DateTime<Utc>,
}

/// Minimal review projection for sitemap generation. Reviews live
/// under their venue's URL, so both parent slugs come along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStamp {
    pub slug: String,
    pub venue_slug: String,
    pub city_slug: String,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal guide projection for sitemap generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideStamp {
    pub slug: String,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_stamp_serde_round_trip() {
        let stamp = ReviewStamp {
            slug: "gran-marisco".to_string(),
            venue_slug: "la-tasca".to_string(),
            city_slug: "madrid".to_string(),
            published_at: None,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&stamp).unwrap();
        let back: ReviewStamp = serde_json::from_str(&json).unwrap();
        assert_eq!(stamp, back);
    }
}
