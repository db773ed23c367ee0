use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use tapeo_auth::CurrentEditor;
use tapeo_core::content::ContentKind;
use tapeo_core::qr::{FeedbackStatus, QrFeedback};
use tapeo_core::storage::ContentError;

use crate::{handlers::error::ApiError, models::UpdateFeedbackStatus, state::AppState};

#[derive(Debug, Deserialize)]
pub struct FeedbackFilter {
    pub status: Option<FeedbackStatus>,
}

/// List visitor feedback, optionally by status (GET /api/admin/feedback?status=).
pub async fn list_feedback(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Query(filter): Query<FeedbackFilter>,
) -> Result<Json<Vec<QrFeedback>>, ApiError> {
    Ok(Json(state.content.list_feedback(filter.status).await?))
}

/// Get a single feedback entry by ID (GET /api/admin/feedback/{id}).
pub async fn get_feedback(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<QrFeedback>, ApiError> {
    let feedback = state
        .content
        .get_feedback(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::QrFeedback, id.to_string()))?;

    Ok(Json(feedback))
}

/// Move a feedback entry through the triage states (PUT /api/admin/feedback/{id}).
///
/// There is no delete; archiving is the terminal state.
pub async fn set_feedback_status(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFeedbackStatus>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.content.set_feedback_status(id, payload.status).await?;

    let feedback = state
        .content
        .get_feedback(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::QrFeedback, id.to_string()))?;

    tracing::info!(feedback_id = %id, status = %payload.status, "Updated feedback status");

    Ok(Json(json!({
        "success": true,
        "feedback": feedback,
        "message": "Comentario actualizado correctamente",
    })))
}
