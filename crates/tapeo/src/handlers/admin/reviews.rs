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
use tapeo_core::content::{ContentKind, Review};
use tapeo_core::storage::ContentError;

use crate::{
    handlers::{admin::ping_indexnow, error::ApiError},
    models::{CreateReview, UpdateReview},
    state::AppState,
    urls,
};

#[derive(Debug, Deserialize)]
pub struct ReviewFilter {
    pub venue_id: Option<Uuid>,
}

/// List reviews, optionally scoped to a venue (GET /api/admin/reviews?venue_id=).
pub async fn list_reviews(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Query(filter): Query<ReviewFilter>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.content.list_reviews(filter.venue_id).await?))
}

/// Get a single review by ID (GET /api/admin/reviews/{id}).
pub async fn get_review(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<Review>, ApiError> {
    let review = state
        .content
        .get_review(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Review, id.to_string()))?;

    Ok(Json(review))
}

/// Create a new review (POST /api/admin/reviews).
///
/// Drafts only ping the venue page; the review page is queued once the
/// review is published.
pub async fn create_review(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Json(payload): Json<CreateReview>,
) -> Result<impl IntoResponse, ApiError> {
    let review = payload.into_review();
    review.validate()?;

    let venue = state
        .content
        .get_venue(review.venue_id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Venue, review.venue_id.to_string()))?;

    state.content.create_review(&review).await?;

    tracing::info!(review_id = %review.id, slug = %review.slug, venue = %venue.slug, "Created review");
    ping_indexnow(
        &state,
        affected_paths(&state, &review, review.is_published()).await?,
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "review": review,
            "message": "Reseña creada correctamente",
        })),
    ))
}

/// Update a review by ID (PUT /api/admin/reviews/{id}).
pub async fn update_review(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReview>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut review = state
        .content
        .get_review(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Review, id.to_string()))?;

    payload.apply_to(&mut review);
    review.validate()?;

    state.content.update_review(&review).await?;

    tracing::info!(review_id = %id, slug = %review.slug, "Updated review");
    // The review page is always pinged here so publish and unpublish
    // transitions both get recrawled.
    ping_indexnow(&state, affected_paths(&state, &review, true).await?);

    Ok(Json(json!({
        "success": true,
        "review": review,
        "message": "Reseña actualizada correctamente",
    })))
}

/// Delete a review by ID (DELETE /api/admin/reviews/{id}).
pub async fn delete_review(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let review = state
        .content
        .get_review(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Review, id.to_string()))?;

    let paths = affected_paths(&state, &review, true).await?;

    state.content.delete_review(id).await?;

    tracing::info!(review_id = %id, slug = %review.slug, "Deleted review");
    ping_indexnow(&state, paths);

    Ok(Json(json!({
        "success": true,
        "message": "Reseña eliminada correctamente",
    })))
}

/// Public pages affected by a review mutation.
///
/// Resolves the venue and city slugs the URLs are built from. Returns
/// no paths when a parent is missing rather than failing the mutation.
async fn affected_paths(
    state: &AppState,
    review: &Review,
    include_review_page: bool,
) -> Result<Vec<String>, ApiError> {
    let Some(venue) = state.content.get_venue(review.venue_id).await? else {
        return Ok(Vec::new());
    };
    let Some(city) = state.content.get_city(venue.city_id).await? else {
        return Ok(Vec::new());
    };

    let mut paths = vec![urls::venue_path(&city.slug, &venue.slug)];
    if include_review_page {
        paths.push(urls::review_path(&city.slug, &venue.slug, &review.slug));
    }

    Ok(paths)
}
