use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use tapeo_auth::CurrentEditor;
use tapeo_core::content::{ContentKind, Venue};
use tapeo_core::storage::ContentError;

use crate::{
    handlers::{admin::ping_indexnow, error::ApiError},
    models::{CreateVenue, UpdateVenue},
    state::AppState,
    urls,
};

#[derive(Debug, Deserialize)]
pub struct VenueFilter {
    pub city_id: Option<Uuid>,
}

/// List venues, optionally scoped to a city (GET /api/admin/venues?city_id=).
pub async fn list_venues(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Query(filter): Query<VenueFilter>,
) -> Result<Json<Vec<Venue>>, ApiError> {
    Ok(Json(state.content.list_venues(filter.city_id).await?))
}

/// Get a single venue by ID (GET /api/admin/venues/{id}).
pub async fn get_venue(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<Venue>, ApiError> {
    let venue = state
        .content
        .get_venue(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Venue, id.to_string()))?;

    Ok(Json(venue))
}

/// Create a new venue (POST /api/admin/venues).
///
/// The target city must exist; the store only checks slug uniqueness.
pub async fn create_venue(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Json(payload): Json<CreateVenue>,
) -> Result<impl IntoResponse, ApiError> {
    let venue = payload.into_venue();
    venue.validate()?;

    let city = state
        .content
        .get_city(venue.city_id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::City, venue.city_id.to_string()))?;

    state.content.create_venue(&venue).await?;

    tracing::info!(venue_id = %venue.id, slug = %venue.slug, city = %city.slug, "Created venue");
    ping_indexnow(
        &state,
        vec![
            urls::venue_path(&city.slug, &venue.slug),
            urls::city_path(&city.slug),
        ],
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "venue": venue,
            "message": "Local creado correctamente",
        })),
    ))
}

/// Update a venue by ID (PUT /api/admin/venues/{id}).
///
/// When the payload moves the venue to another city, the old city page
/// is pinged as well so its listing gets recrawled.
pub async fn update_venue(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVenue>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut venue = state
        .content
        .get_venue(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Venue, id.to_string()))?;

    let previous_city_id = venue.city_id;
    payload.apply_to(&mut venue);
    venue.validate()?;

    let city = state
        .content
        .get_city(venue.city_id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::City, venue.city_id.to_string()))?;

    state.content.update_venue(&venue).await?;

    tracing::info!(venue_id = %id, slug = %venue.slug, "Updated venue");

    let mut paths = vec![
        urls::venue_path(&city.slug, &venue.slug),
        urls::city_path(&city.slug),
    ];
    if previous_city_id != venue.city_id {
        if let Some(previous) = state.content.get_city(previous_city_id).await? {
            paths.push(urls::city_path(&previous.slug));
        }
    }
    ping_indexnow(&state, paths);

    Ok(Json(json!({
        "success": true,
        "venue": venue,
        "message": "Local actualizado correctamente",
    })))
}

/// Delete a venue by ID (DELETE /api/admin/venues/{id}).
///
/// The store refuses to delete a venue that still has reviews.
pub async fn delete_venue(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let venue = state
        .content
        .get_venue(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Venue, id.to_string()))?;

    state.content.delete_venue(id).await?;

    tracing::info!(venue_id = %id, slug = %venue.slug, "Deleted venue");

    if let Some(city) = state.content.get_city(venue.city_id).await? {
        ping_indexnow(
            &state,
            vec![
                urls::venue_path(&city.slug, &venue.slug),
                urls::city_path(&city.slug),
            ],
        );
    }

    Ok(Json(json!({
        "success": true,
        "message": "Local eliminado correctamente",
    })))
}
