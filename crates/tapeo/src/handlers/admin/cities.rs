use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use tapeo_auth::CurrentEditor;
use tapeo_core::content::{City, ContentKind};
use tapeo_core::storage::ContentError;

use crate::{
    handlers::{admin::ping_indexnow, error::ApiError},
    models::{CreateCity, UpdateCity},
    state::AppState,
    urls,
};

/// List all cities (GET /api/admin/cities).
pub async fn list_cities(
    State(state): State<AppState>,
    _editor: CurrentEditor,
) -> Result<Json<Vec<City>>, ApiError> {
    Ok(Json(state.content.list_cities().await?))
}

/// Get a single city by ID (GET /api/admin/cities/{id}).
pub async fn get_city(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<City>, ApiError> {
    let city = state
        .content
        .get_city(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::City, id.to_string()))?;

    Ok(Json(city))
}

/// Create a new city (POST /api/admin/cities).
pub async fn create_city(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Json(payload): Json<CreateCity>,
) -> Result<impl IntoResponse, ApiError> {
    let city = payload.into_city();
    city.validate()?;

    state.content.create_city(&city).await?;

    tracing::info!(city_id = %city.id, slug = %city.slug, "Created city");
    ping_indexnow(&state, vec![urls::city_path(&city.slug)]);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "city": city,
            "message": "Ciudad creada correctamente",
        })),
    ))
}

/// Update a city by ID (PUT /api/admin/cities/{id}).
pub async fn update_city(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCity>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut city = state
        .content
        .get_city(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::City, id.to_string()))?;

    payload.apply_to(&mut city);
    city.validate()?;

    state.content.update_city(&city).await?;

    tracing::info!(city_id = %id, slug = %city.slug, "Updated city");
    ping_indexnow(&state, vec![urls::city_path(&city.slug)]);

    Ok(Json(json!({
        "success": true,
        "city": city,
        "message": "Ciudad actualizada correctamente",
    })))
}

/// Delete a city by ID (DELETE /api/admin/cities/{id}).
///
/// The store refuses to delete a city that still has venues.
pub async fn delete_city(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let city = state
        .content
        .get_city(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::City, id.to_string()))?;

    state.content.delete_city(id).await?;

    tracing::info!(city_id = %id, slug = %city.slug, "Deleted city");
    ping_indexnow(&state, vec![urls::city_path(&city.slug)]);

    Ok(Json(json!({
        "success": true,
        "message": "Ciudad eliminada correctamente",
    })))
}
