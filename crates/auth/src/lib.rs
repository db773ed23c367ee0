//! Session authentication for tapeo.
//!
//! This crate provides:
//! - Email/password login backed by bcrypt hashes
//! - User, session, and notification storage (in-memory, or SQLite via
//!   the `sqlite` feature flag)
//! - Axum extractors for authentication and role checks

mod config;
mod error;
mod extractors;
mod handlers;
mod password;
mod state;
mod store;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{
    CurrentAdmin, CurrentEditor, CurrentUser, OptionalUser, ProvisioningSecret,
    ADMIN_SECRET_HEADER,
};
pub use handlers::auth_routes;
pub use password::{hash_password, verify_password};
pub use state::AuthState;
pub use store::InMemoryAuthStore;
#[cfg(feature = "sqlite")]
pub use store::SqliteAuthStore;
