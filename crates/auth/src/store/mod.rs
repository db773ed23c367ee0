//! User, session, and notification storage backends.
//!
//! The in-memory store is always available and backs development and
//! tests; the SQLite store is enabled with the `sqlite` feature flag.

mod inmemory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use inmemory::InMemoryAuthStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteAuthStore;
