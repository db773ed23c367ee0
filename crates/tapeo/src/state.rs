//! Shared application state.

use std::sync::Arc;

use axum::extract::FromRef;
use tapeo_auth::{AuthConfig, AuthState};
use tapeo_core::storage::ContentStore;

use crate::cache::MemoryTagCache;
use crate::config::Config;
use crate::content::CachedContentStore;
use crate::indexnow::IndexNowSink;

#[cfg(not(any(feature = "cms", feature = "inmemory")))]
compile_error!("enable a content backend: feature `inmemory` (default) or `cms`");

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentStore>,
    pub auth: AuthState,
    pub indexnow: IndexNowSink,
    pub base_url: String,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl AppState {
    /// Builds the full state: the content backend behind the tag cache,
    /// the account stores and the IndexNow worker.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let content = build_content_store(config);
        let (sessions, users, notifications) = build_auth_stores(config).await?;
        let auth = AuthState::new(sessions, users, notifications, AuthConfig::from_env());

        Ok(Self {
            content,
            auth,
            indexnow: IndexNowSink::spawn(config),
            base_url: config.base_url.clone(),
        })
    }
}

#[cfg(feature = "cms")]
fn build_content_store(config: &Config) -> Arc<dyn ContentStore> {
    tracing::info!(base_url = %config.cms_base_url, dataset = %config.cms_dataset, "Using the CMS content store");
    let store = crate::content::HttpContentStore::new(
        config.cms_base_url.clone(),
        config.cms_dataset.clone(),
        config.cms_token.clone(),
    );
    wrap_with_cache(store, config)
}

#[cfg(not(feature = "cms"))]
fn build_content_store(config: &Config) -> Arc<dyn ContentStore> {
    tracing::info!("Using the in-memory content store with demo data");
    wrap_with_cache(
        crate::content::InMemoryContentStore::with_demo_data(),
        config,
    )
}

fn wrap_with_cache<R>(store: R, config: &Config) -> Arc<dyn ContentStore>
where
    R: ContentStore + 'static,
{
    let cache = Arc::new(MemoryTagCache::new(config.cache_max_entries));
    Arc::new(CachedContentStore::new(
        Arc::new(store),
        cache,
        config.cache_ttl(),
    ))
}

type AuthStores = (
    Arc<dyn tapeo_core::auth::SessionRepository>,
    Arc<dyn tapeo_core::auth::UserRepository>,
    Arc<dyn tapeo_core::auth::NotificationRepository>,
);

#[cfg(feature = "auth-sqlite")]
async fn build_auth_stores(config: &Config) -> anyhow::Result<AuthStores> {
    use sqlx::sqlite::SqlitePoolOptions;

    tracing::info!(database_url = %config.database_url, "Using the SQLite account store");
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let store = tapeo_auth::SqliteAuthStore::new(pool);
    store.migrate().await?;

    let store = Arc::new(store);
    Ok((store.clone(), store.clone(), store))
}

#[cfg(not(feature = "auth-sqlite"))]
async fn build_auth_stores(_config: &Config) -> anyhow::Result<AuthStores> {
    tracing::info!("Using the in-memory account store");
    let store = Arc::new(tapeo_auth::InMemoryAuthStore::new());
    Ok((store.clone(), store.clone(), store))
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use chrono::{Duration, Utc};
    use tapeo_core::auth::{generate_session_id, Role, Session, User};

    impl Default for AppState {
        /// Empty in-memory stores and a disabled IndexNow sink.
        fn default() -> Self {
            let auth_store = Arc::new(tapeo_auth::InMemoryAuthStore::new());
            Self {
                content: Arc::new(crate::content::InMemoryContentStore::new()),
                auth: AuthState::new(
                    auth_store.clone(),
                    auth_store.clone(),
                    auth_store,
                    AuthConfig::default(),
                ),
                indexnow: IndexNowSink::disabled(),
                base_url: "http://localhost:3000".to_string(),
            }
        }
    }

    /// Creates a user with the given role plus a live session, and
    /// returns the session cookie ready for a `Cookie` header.
    pub async fn session_for(state: &AppState, role: Role) -> String {
        let user = User::new(
            format!("{}@test.example", uuid::Uuid::new_v4()),
            "Test",
            role,
            "not-a-real-hash",
        );
        state.auth.users.create_user(&user).await.unwrap();

        let now = Utc::now();
        let session = Session {
            id: generate_session_id(),
            user_id: user.id,
            created_at: now,
            expires_at: now + Duration::hours(12),
        };
        state.auth.sessions.create_session(&session).await.unwrap();

        format!("{}={}", state.auth.config.cookie_name, session.id)
    }

    pub async fn admin_session(state: &AppState) -> String {
        session_for(state, Role::Admin).await
    }

    pub async fn editor_session(state: &AppState) -> String {
        session_for(state, Role::Editor).await
    }
}
