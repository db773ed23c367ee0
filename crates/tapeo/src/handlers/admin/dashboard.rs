use axum::{extract::State, Json};
use serde_json::json;

use tapeo_auth::CurrentEditor;

use crate::{handlers::error::ApiError, state::AppState};

/// Counters for the admin landing page (GET /api/admin/dashboard).
///
/// Content counts come from one concurrent round to the store; the
/// unread badge is per user and read from the auth store.
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentEditor(user): CurrentEditor,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (cities, venues, reviews, categories, guides, pending_feedback) = tokio::try_join!(
        state.content.count_cities(),
        state.content.count_venues(),
        state.content.count_reviews(),
        state.content.count_categories(),
        state.content.count_guides(),
        state.content.count_pending_feedback(),
    )?;

    let unread_notifications = state.auth.notifications.count_unread(user.id).await?;

    Ok(Json(json!({
        "cities": cities,
        "venues": venues,
        "reviews": reviews,
        "categories": categories,
        "guides": guides,
        "pending_feedback": pending_feedback,
        "unread_notifications": unread_notifications,
    })))
}
