use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use tapeo_auth::CurrentEditor;
use tapeo_core::auth::Notification;

use crate::{handlers::error::ApiError, state::AppState};

/// List the signed-in user's notifications, newest first
/// (GET /api/admin/notifications).
pub async fn list_notifications(
    State(state): State<AppState>,
    CurrentEditor(user): CurrentEditor,
) -> Result<Json<serde_json::Value>, ApiError> {
    let notifications: Vec<Notification> =
        state.auth.notifications.list_notifications(user.id).await?;
    let unread = state.auth.notifications.count_unread(user.id).await?;

    Ok(Json(json!({
        "notifications": notifications,
        "unread": unread,
    })))
}

/// Mark one notification as read (POST /api/admin/notifications/{id}/read).
///
/// Scoped to the signed-in user; marking someone else's notification
/// is a silent no-op rather than an information leak.
pub async fn mark_notification_read(
    State(state): State<AppState>,
    CurrentEditor(user): CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .auth
        .notifications
        .mark_notification_read(id, user.id)
        .await?;

    Ok(Json(json!({ "success": true })))
}
