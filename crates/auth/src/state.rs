//! Application state for auth.

use std::sync::Arc;
use tapeo_core::auth::{NotificationRepository, SessionRepository, UserRepository};

use crate::config::AuthConfig;

/// Shared state for auth handlers.
pub struct AuthState {
    pub sessions: Arc<dyn SessionRepository>,
    pub users: Arc<dyn UserRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub config: AuthConfig,
}

impl AuthState {
    /// Creates a new AuthState with all required repositories.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        notifications: Arc<dyn NotificationRepository>,
        config: AuthConfig,
    ) -> Self {
        Self {
            sessions,
            users,
            notifications,
            config,
        }
    }
}

impl Clone for AuthState {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            users: self.users.clone(),
            notifications: self.notifications.clone(),
            config: self.config.clone(),
        }
    }
}
