//! Content document types and the rules that govern them.
//!
//! Everything the public site and the admin API read or write lives in
//! the content dataset as one of these document kinds. The types here
//! are plain data plus validation; persistence is behind the traits in
//! [`crate::storage`].

mod featured;
mod kind;
mod rating;
mod slug;
mod types;

pub use featured::{
    live_featured, visible_sections, FeaturedCard, FeaturedItem, FeaturedTarget, HomepageSection,
    SectionKind,
};
pub use kind::ContentKind;
pub use rating::Ratings;
pub use slug::{is_valid_slug, slugify};
pub use types::{Category, City, FaqEntry, GeoPoint, Guide, PriceRange, Recipe, Review, Venue};
