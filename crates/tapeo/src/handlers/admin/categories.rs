use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use tapeo_auth::CurrentEditor;
use tapeo_core::content::{Category, ContentKind};
use tapeo_core::storage::ContentError;

use crate::{
    handlers::{admin::ping_indexnow, error::ApiError},
    models::{CreateCategory, UpdateCategory},
    state::AppState,
    urls,
};

/// List all categories (GET /api/admin/categories).
pub async fn list_categories(
    State(state): State<AppState>,
    _editor: CurrentEditor,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.content.list_categories().await?))
}

/// Get a single category by ID (GET /api/admin/categories/{id}).
pub async fn get_category(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>, ApiError> {
    let category = state
        .content
        .get_category(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Category, id.to_string()))?;

    Ok(Json(category))
}

/// Create a new category (POST /api/admin/categories).
pub async fn create_category(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Json(payload): Json<CreateCategory>,
) -> Result<impl IntoResponse, ApiError> {
    let category = payload.into_category();
    category.validate()?;

    state.content.create_category(&category).await?;

    tracing::info!(category_id = %category.id, slug = %category.slug, "Created category");
    ping_indexnow(&state, vec![urls::category_path(&category.slug)]);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "category": category,
            "message": "Categoría creada correctamente",
        })),
    ))
}

/// Update a category by ID (PUT /api/admin/categories/{id}).
pub async fn update_category(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategory>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut category = state
        .content
        .get_category(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Category, id.to_string()))?;

    payload.apply_to(&mut category);
    category.validate()?;

    state.content.update_category(&category).await?;

    tracing::info!(category_id = %id, slug = %category.slug, "Updated category");
    ping_indexnow(&state, vec![urls::category_path(&category.slug)]);

    Ok(Json(json!({
        "success": true,
        "category": category,
        "message": "Categoría actualizada correctamente",
    })))
}

/// Delete a category by ID (DELETE /api/admin/categories/{id}).
///
/// The store refuses to delete a category still referenced by venues.
pub async fn delete_category(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let category = state
        .content
        .get_category(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Category, id.to_string()))?;

    state.content.delete_category(id).await?;

    tracing::info!(category_id = %id, slug = %category.slug, "Deleted category");
    ping_indexnow(&state, vec![urls::category_path(&category.slug)]);

    Ok(Json(json!({
        "success": true,
        "message": "Categoría eliminada correctamente",
    })))
}
