//! Content store backends.
//!
//! The CMS-backed [`HttpContentStore`] is the production backend; the
//! [`InMemoryContentStore`] backs local development and tests. Both
//! sit behind the [`CachedContentStore`] decorator.

pub mod cached;
#[cfg(feature = "cms")]
pub mod http;
pub mod inmemory;
#[cfg(feature = "cms")]
pub mod query;

pub use cached::CachedContentStore;
#[cfg(feature = "cms")]
pub use http::HttpContentStore;
pub use inmemory::InMemoryContentStore;
