mod error;
mod serialization;
mod tags;
mod traits;

pub use error::{CacheError, Result};
pub use serialization::{from_cache_bytes, to_cache_bytes};
pub use tags::{
    categories_key, category_slug_key, cities_key, city_slug_key, doc_key, featured_key,
    guide_slug_key, guides_key, kind_tag, qr_code_key, recent_reviews_key, review_slug_key,
    reviews_key, sections_key, stamps_key, venue_slug_key, venues_key, HOMEPAGE_TAG, SITEMAP_TAG,
};
pub use traits::TagCache;
