use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use tapeo_auth::CurrentEditor;
use tapeo_core::content::{ContentKind, Guide};
use tapeo_core::storage::ContentError;

use crate::{
    handlers::{admin::ping_indexnow, error::ApiError},
    models::{CreateGuide, UpdateGuide},
    state::AppState,
    urls,
};

/// List all guides, drafts included (GET /api/admin/guides).
pub async fn list_guides(
    State(state): State<AppState>,
    _editor: CurrentEditor,
) -> Result<Json<Vec<Guide>>, ApiError> {
    Ok(Json(state.content.list_guides().await?))
}

/// Get a single guide by ID (GET /api/admin/guides/{id}).
pub async fn get_guide(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<Guide>, ApiError> {
    let guide = state
        .content
        .get_guide(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Guide, id.to_string()))?;

    Ok(Json(guide))
}

/// Create a new guide (POST /api/admin/guides).
pub async fn create_guide(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Json(payload): Json<CreateGuide>,
) -> Result<impl IntoResponse, ApiError> {
    let guide = payload.into_guide();
    guide.validate()?;

    state.content.create_guide(&guide).await?;

    tracing::info!(guide_id = %guide.id, slug = %guide.slug, "Created guide");
    ping_indexnow(&state, affected_paths(&guide, guide.is_published()));

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "guide": guide,
            "message": "Guía creada correctamente",
        })),
    ))
}

/// Update a guide by ID (PUT /api/admin/guides/{id}).
pub async fn update_guide(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGuide>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut guide = state
        .content
        .get_guide(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Guide, id.to_string()))?;

    payload.apply_to(&mut guide);
    guide.validate()?;

    state.content.update_guide(&guide).await?;

    tracing::info!(guide_id = %id, slug = %guide.slug, "Updated guide");
    ping_indexnow(&state, affected_paths(&guide, true));

    Ok(Json(json!({
        "success": true,
        "guide": guide,
        "message": "Guía actualizada correctamente",
    })))
}

/// Delete a guide by ID (DELETE /api/admin/guides/{id}).
pub async fn delete_guide(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let guide = state
        .content
        .get_guide(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Guide, id.to_string()))?;

    state.content.delete_guide(id).await?;

    tracing::info!(guide_id = %id, slug = %guide.slug, "Deleted guide");
    ping_indexnow(&state, affected_paths(&guide, true));

    Ok(Json(json!({
        "success": true,
        "message": "Guía eliminada correctamente",
    })))
}

/// The guide listing always changes; the guide page itself is only
/// queued for published guides (or on transitions, where the caller
/// passes `true`).
fn affected_paths(guide: &Guide, include_guide_page: bool) -> Vec<String> {
    let mut paths = vec!["/guias".to_string()];
    if include_guide_page {
        paths.push(urls::guide_path(&guide.slug));
    }
    paths
}
