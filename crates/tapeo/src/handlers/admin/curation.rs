//! Homepage curation: featured slots and section layout.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use tapeo_auth::CurrentEditor;
use tapeo_core::content::{ContentKind, FeaturedItem, HomepageSection};
use tapeo_core::storage::ContentError;

use crate::{
    handlers::{admin::ping_indexnow, error::ApiError},
    models::{
        CreateFeaturedItem, CreateHomepageSection, SectionUpsert, UpdateFeaturedItem,
        UpdateHomepageSection,
    },
    state::AppState,
};

// Every curation mutation changes the homepage.
const HOMEPAGE: &str = "/";

/// List all featured items, expired slots included (GET /api/admin/featured).
pub async fn list_featured_items(
    State(state): State<AppState>,
    _editor: CurrentEditor,
) -> Result<Json<Vec<FeaturedItem>>, ApiError> {
    Ok(Json(state.content.list_featured_items().await?))
}

/// Get a single featured item by ID (GET /api/admin/featured/{id}).
pub async fn get_featured_item(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<FeaturedItem>, ApiError> {
    let item = state
        .content
        .get_featured_item(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::FeaturedItem, id.to_string()))?;

    Ok(Json(item))
}

/// Create a featured item (POST /api/admin/featured).
pub async fn create_featured_item(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Json(payload): Json<CreateFeaturedItem>,
) -> Result<impl IntoResponse, ApiError> {
    let item = payload.into_featured_item();

    state.content.create_featured_item(&item).await?;

    tracing::info!(item_id = %item.id, kind = item.target.kind_label(), "Created featured item");
    ping_indexnow(&state, vec![HOMEPAGE.to_string()]);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "featured_item": item,
            "message": "Elemento destacado creado correctamente",
        })),
    ))
}

/// Update a featured item by ID (PUT /api/admin/featured/{id}).
pub async fn update_featured_item(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFeaturedItem>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut item = state
        .content
        .get_featured_item(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::FeaturedItem, id.to_string()))?;

    payload.apply_to(&mut item);

    state.content.update_featured_item(&item).await?;

    tracing::info!(item_id = %id, "Updated featured item");
    ping_indexnow(&state, vec![HOMEPAGE.to_string()]);

    Ok(Json(json!({
        "success": true,
        "featured_item": item,
        "message": "Elemento destacado actualizado correctamente",
    })))
}

/// Delete a featured item by ID (DELETE /api/admin/featured/{id}).
pub async fn delete_featured_item(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.content.delete_featured_item(id).await?;

    tracing::info!(item_id = %id, "Deleted featured item");
    ping_indexnow(&state, vec![HOMEPAGE.to_string()]);

    Ok(Json(json!({
        "success": true,
        "message": "Elemento destacado eliminado correctamente",
    })))
}

/// List homepage sections in display order (GET /api/admin/sections).
pub async fn list_sections(
    State(state): State<AppState>,
    _editor: CurrentEditor,
) -> Result<Json<Vec<HomepageSection>>, ApiError> {
    Ok(Json(state.content.list_homepage_sections().await?))
}

/// Create a homepage section (POST /api/admin/sections).
pub async fn create_section(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Json(payload): Json<CreateHomepageSection>,
) -> Result<impl IntoResponse, ApiError> {
    let section = payload.into_section();
    section.validate()?;

    state.content.create_homepage_section(&section).await?;

    tracing::info!(section_id = %section.id, kind = ?section.kind, "Created homepage section");
    ping_indexnow(&state, vec![HOMEPAGE.to_string()]);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "section": section,
            "message": "Sección creada correctamente",
        })),
    ))
}

/// Update a homepage section by ID (PUT /api/admin/sections/{id}).
pub async fn update_section(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHomepageSection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut section = state
        .content
        .get_homepage_section(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::HomepageSection, id.to_string()))?;

    payload.apply_to(&mut section);
    section.validate()?;

    state.content.update_homepage_section(&section).await?;

    tracing::info!(section_id = %id, "Updated homepage section");
    ping_indexnow(&state, vec![HOMEPAGE.to_string()]);

    Ok(Json(json!({
        "success": true,
        "section": section,
        "message": "Sección actualizada correctamente",
    })))
}

/// Delete a homepage section by ID (DELETE /api/admin/sections/{id}).
pub async fn delete_section(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.content.delete_homepage_section(id).await?;

    tracing::info!(section_id = %id, "Deleted homepage section");
    ping_indexnow(&state, vec![HOMEPAGE.to_string()]);

    Ok(Json(json!({
        "success": true,
        "message": "Sección eliminada correctamente",
    })))
}

/// Replace the whole section layout in one call (PUT /api/admin/sections).
///
/// Positions come from array order, so the admin UI can reorder by
/// sending the list as displayed. Sections not present in the payload
/// are removed.
pub async fn replace_sections(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Json(payload): Json<Vec<SectionUpsert>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sections: Vec<HomepageSection> = payload
        .into_iter()
        .enumerate()
        .map(|(position, upsert)| upsert.into_section(position as u32))
        .collect();

    for section in &sections {
        section.validate()?;
    }

    state.content.replace_homepage_sections(&sections).await?;

    tracing::info!(count = sections.len(), "Replaced homepage sections");
    ping_indexnow(&state, vec![HOMEPAGE.to_string()]);

    Ok(Json(json!({
        "success": true,
        "sections": sections,
        "message": "Portada actualizada correctamente",
    })))
}
