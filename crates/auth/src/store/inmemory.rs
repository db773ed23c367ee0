//! In-memory account storage for development and testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use tapeo_core::auth::{
    AuthError, Notification, NotificationRepository, Result, Role, Session, SessionId,
    SessionRepository, User, UserRepository,
};

/// In-memory account store for development and testing.
///
/// Stores users, sessions, and notifications in HashMaps wrapped in
/// `Arc<RwLock<_>>`. Data is not persisted and will be lost when the
/// store is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryAuthStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    notifications: Arc<RwLock<HashMap<Uuid, Notification>>>,
}

impl Default for InMemoryAuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            notifications: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemoryAuthStore {
    async fn create_session(&self, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.as_str().to_string(), session.clone());
        Ok(())
    }

    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id.as_str()).cloned())
    }

    async fn delete_session(&self, id: &SessionId) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id.as_str());
        Ok(())
    }

    async fn delete_user_sessions(&self, user_id: Uuid) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.user_id != user_id);
        Ok(())
    }

    async fn purge_expired_sessions(&self) -> Result<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}

#[async_trait]
impl UserRepository for InMemoryAuthStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        let email = user.email.trim().to_lowercase();
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken);
        }

        let mut user = user.clone();
        user.email = email;
        users.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.trim().to_lowercase();
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&user.id).ok_or(AuthError::UserNotFound)?;

        stored.name = user.name.clone();
        stored.role = user.role;
        stored.password_hash = user.password_hash.clone();
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users.get(&id).ok_or(AuthError::UserNotFound)?;

        if user.is_admin() {
            let admins = users.values().filter(|u| u.is_admin()).count();
            if admins <= 1 {
                return Err(AuthError::LastAdmin);
            }
        }

        users.remove(&id);
        drop(users);

        self.sessions.write().await.retain(|_, s| s.user_id != id);
        self.notifications
            .write()
            .await
            .retain(|_, n| n.user_id != id);
        Ok(())
    }

    async fn count_admins(&self) -> Result<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.is_admin()).count() as u64)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryAuthStore {
    async fn create_notification(&self, notification: &Notification) -> Result<()> {
        let mut notifications = self.notifications.write().await;
        notifications.insert(notification.id, notification.clone());
        Ok(())
    }

    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        let mut for_user: Vec<Notification> = notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        for_user.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(for_user)
    }

    async fn mark_notification_read(&self, id: Uuid, user_id: Uuid) -> Result<()> {
        let mut notifications = self.notifications.write().await;
        if let Some(notification) = notifications.get_mut(&id) {
            if notification.user_id == user_id {
                notification.read = true;
            }
        }
        Ok(())
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<u64> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.read)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tapeo_core::auth::NotificationKind;

    fn test_user(email: &str, role: Role) -> User {
        User::new(email, "Test", role, "$2b$04$hash")
    }

    fn test_session(id: &str, user_id: Uuid, ttl_hours: i64) -> Session {
        Session {
            id: SessionId::new(id.to_string()),
            user_id,
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::hours(ttl_hours),
        }
    }

    // ==================== Session Tests ====================

    #[tokio::test]
    async fn test_session_create_and_get() {
        let store = InMemoryAuthStore::new();
        let user_id = Uuid::new_v4();
        let session = test_session("session-1", user_id, 12);

        store.create_session(&session).await.unwrap();

        let retrieved = store
            .get_session(&SessionId::new("session-1".to_string()))
            .await
            .unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().user_id, user_id);
    }

    #[tokio::test]
    async fn test_session_delete() {
        let store = InMemoryAuthStore::new();
        let session = test_session("session-1", Uuid::new_v4(), 12);

        store.create_session(&session).await.unwrap();
        store
            .delete_session(&SessionId::new("session-1".to_string()))
            .await
            .unwrap();

        let retrieved = store
            .get_session(&SessionId::new("session-1".to_string()))
            .await
            .unwrap();
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_delete_user_sessions() {
        let store = InMemoryAuthStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store
            .create_session(&test_session("session-1", alice, 12))
            .await
            .unwrap();
        store
            .create_session(&test_session("session-2", alice, 12))
            .await
            .unwrap();
        store
            .create_session(&test_session("session-3", bob, 12))
            .await
            .unwrap();

        store.delete_user_sessions(alice).await.unwrap();

        assert!(store
            .get_session(&SessionId::new("session-1".to_string()))
            .await
            .unwrap()
            .is_none());
        assert!(store
            .get_session(&SessionId::new("session-3".to_string()))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_purge_expired_sessions() {
        let store = InMemoryAuthStore::new();
        let user_id = Uuid::new_v4();

        store
            .create_session(&test_session("live", user_id, 12))
            .await
            .unwrap();
        store
            .create_session(&test_session("stale", user_id, -1))
            .await
            .unwrap();

        let purged = store.purge_expired_sessions().await.unwrap();
        assert_eq!(purged, 1);

        assert!(store
            .get_session(&SessionId::new("live".to_string()))
            .await
            .unwrap()
            .is_some());
        assert!(store
            .get_session(&SessionId::new("stale".to_string()))
            .await
            .unwrap()
            .is_none());
    }

    // ==================== User Tests ====================

    #[tokio::test]
    async fn test_user_create_and_get_by_email() {
        let store = InMemoryAuthStore::new();
        let user = test_user("ana@tapeo.es", Role::Editor);

        store.create_user(&user).await.unwrap();

        let retrieved = store.get_user_by_email("ANA@tapeo.es").await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_user_duplicate_email_rejected() {
        let store = InMemoryAuthStore::new();

        store
            .create_user(&test_user("ana@tapeo.es", Role::Editor))
            .await
            .unwrap();

        let result = store
            .create_user(&test_user("Ana@Tapeo.es", Role::Member))
            .await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_user_update_changes_role_and_hash() {
        let store = InMemoryAuthStore::new();
        let mut user = test_user("ana@tapeo.es", Role::Member);

        store.create_user(&user).await.unwrap();

        user.role = Role::Editor;
        user.password_hash = "$2b$04$other".to_string();
        store.update_user(&user).await.unwrap();

        let updated = store.get_user(user.id).await.unwrap().unwrap();
        assert_eq!(updated.role, Role::Editor);
        assert_eq!(updated.password_hash, "$2b$04$other");
    }

    #[tokio::test]
    async fn test_user_update_nonexistent() {
        let store = InMemoryAuthStore::new();
        let user = test_user("nadie@tapeo.es", Role::Member);

        let result = store.update_user(&user).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_delete_last_admin_blocked() {
        let store = InMemoryAuthStore::new();
        let admin = test_user("admin@tapeo.es", Role::Admin);

        store.create_user(&admin).await.unwrap();

        let result = store.delete_user(admin.id).await;
        assert!(matches!(result, Err(AuthError::LastAdmin)));
    }

    #[tokio::test]
    async fn test_delete_admin_with_another_remaining() {
        let store = InMemoryAuthStore::new();
        let first = test_user("admin@tapeo.es", Role::Admin);
        let second = test_user("otro@tapeo.es", Role::Admin);

        store.create_user(&first).await.unwrap();
        store.create_user(&second).await.unwrap();

        store.delete_user(first.id).await.unwrap();

        assert!(store.get_user(first.id).await.unwrap().is_none());
        assert_eq!(store.count_admins().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_user_removes_sessions_and_notifications() {
        let store = InMemoryAuthStore::new();
        let admin = test_user("admin@tapeo.es", Role::Admin);
        let editor = test_user("ana@tapeo.es", Role::Editor);

        store.create_user(&admin).await.unwrap();
        store.create_user(&editor).await.unwrap();
        store
            .create_session(&test_session("session-1", editor.id, 12))
            .await
            .unwrap();
        store
            .create_notification(&Notification::new(
                editor.id,
                NotificationKind::System,
                "hola",
            ))
            .await
            .unwrap();

        store.delete_user(editor.id).await.unwrap();

        assert!(store
            .get_session(&SessionId::new("session-1".to_string()))
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.count_unread(editor.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_users_oldest_first() {
        let store = InMemoryAuthStore::new();
        let mut first = test_user("primero@tapeo.es", Role::Admin);
        let mut second = test_user("segundo@tapeo.es", Role::Editor);
        first.created_at = Utc::now() - Duration::days(2);
        second.created_at = Utc::now() - Duration::days(1);

        store.create_user(&second).await.unwrap();
        store.create_user(&first).await.unwrap();

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "primero@tapeo.es");
        assert_eq!(users[1].email, "segundo@tapeo.es");
    }

    // ==================== Notification Tests ====================

    #[tokio::test]
    async fn test_notifications_newest_first() {
        let store = InMemoryAuthStore::new();
        let user_id = Uuid::new_v4();

        let mut old = Notification::new(user_id, NotificationKind::System, "antigua");
        old.created_at = Utc::now() - Duration::hours(2);
        let recent = Notification::new(user_id, NotificationKind::QrFeedback, "reciente");

        store.create_notification(&old).await.unwrap();
        store.create_notification(&recent).await.unwrap();

        let list = store.list_notifications(user_id).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].message, "reciente");
        assert_eq!(list[1].message, "antigua");
    }

    #[tokio::test]
    async fn test_mark_notification_read() {
        let store = InMemoryAuthStore::new();
        let user_id = Uuid::new_v4();
        let notification = Notification::new(user_id, NotificationKind::QrFeedback, "hola");

        store.create_notification(&notification).await.unwrap();
        assert_eq!(store.count_unread(user_id).await.unwrap(), 1);

        store
            .mark_notification_read(notification.id, user_id)
            .await
            .unwrap();
        assert_eq!(store.count_unread(user_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mark_read_ignores_other_users() {
        let store = InMemoryAuthStore::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let notification = Notification::new(owner, NotificationKind::QrFeedback, "hola");

        store.create_notification(&notification).await.unwrap();
        store
            .mark_notification_read(notification.id, intruder)
            .await
            .unwrap();

        assert_eq!(store.count_unread(owner).await.unwrap(), 1);
    }

    // ==================== Clone Tests ====================

    #[tokio::test]
    async fn test_clone_shares_state() {
        let store = InMemoryAuthStore::new();
        let clone = store.clone();

        let user = test_user("ana@tapeo.es", Role::Editor);
        store.create_user(&user).await.unwrap();

        let retrieved = clone.get_user(user.id).await.unwrap();
        assert!(retrieved.is_some());
    }
}
