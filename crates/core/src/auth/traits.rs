use async_trait::async_trait;
use uuid::Uuid;

use super::{AuthError, Notification, Session, SessionId, User};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Session storage abstraction.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session.
    async fn create_session(&self, session: &Session) -> Result<()>;

    /// Retrieve session by ID.
    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>>;

    /// Delete a specific session.
    async fn delete_session(&self, id: &SessionId) -> Result<()>;

    /// Delete all sessions for a user (logout-all).
    async fn delete_user_sessions(&self, user_id: Uuid) -> Result<()>;

    /// Delete every expired session. Returns how many were removed.
    async fn purge_expired_sessions(&self) -> Result<u64>;
}

/// User account storage abstraction.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user. Fails with [`AuthError::EmailTaken`] when the
    /// email is already registered.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Retrieve a user by ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Retrieve a user by email.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// All users, oldest account first.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Update name, role and password hash of an existing user.
    async fn update_user(&self, user: &User) -> Result<()>;

    /// Delete a user. Fails with [`AuthError::LastAdmin`] when the user
    /// is the only remaining admin.
    async fn delete_user(&self, id: Uuid) -> Result<()>;

    async fn count_admins(&self) -> Result<u64>;
}

/// Notification storage abstraction.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Store a new notification.
    async fn create_notification(&self, notification: &Notification) -> Result<()>;

    /// Notifications for one user, newest first.
    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>>;

    /// Mark one notification as read.
    async fn mark_notification_read(&self, id: Uuid, user_id: Uuid) -> Result<()>;

    async fn count_unread(&self, user_id: Uuid) -> Result<u64>;
}
