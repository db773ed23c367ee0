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
use tapeo_core::content::ContentKind;
use tapeo_core::qr::{self, QrCode};
use tapeo_core::storage::ContentError;

use crate::{
    handlers::error::ApiError,
    models::{CreateQrCode, UpdateQrCode},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct QrCodeFilter {
    pub venue_id: Option<Uuid>,
}

/// List QR codes, optionally scoped to a venue (GET /api/admin/qr-codes?venue_id=).
pub async fn list_qr_codes(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Query(filter): Query<QrCodeFilter>,
) -> Result<Json<Vec<QrCode>>, ApiError> {
    Ok(Json(state.content.list_qr_codes(filter.venue_id).await?))
}

/// Get a single QR code with its URLs (GET /api/admin/qr-codes/{id}).
pub async fn get_qr_code(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let qr_code = state
        .content
        .get_qr_code(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::QrCode, id.to_string()))?;

    Ok(Json(with_urls(&state, qr_code)))
}

/// Create a QR code for a venue (POST /api/admin/qr-codes).
///
/// When the payload omits the code string one is generated. The code
/// resolves scans, so it must be unique across all venues.
pub async fn create_qr_code(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Json(payload): Json<CreateQrCode>,
) -> Result<impl IntoResponse, ApiError> {
    let qr_code = payload.into_qr_code();

    state
        .content
        .get_venue(qr_code.venue_id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Venue, qr_code.venue_id.to_string()))?;

    if state.content.find_qr_code(&qr_code.code).await?.is_some() {
        return Err(ContentError::InvalidData(
            "Ya existe un código QR con este identificador".to_string(),
        )
        .into());
    }

    state.content.create_qr_code(&qr_code).await?;

    tracing::info!(qr_id = %qr_code.id, code = %qr_code.code, venue_id = %qr_code.venue_id, "Created QR code");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "qr_code": qr_code.clone(),
            "access_url": qr::access_url(&state.base_url, &qr_code.code),
            "download_url": qr::download_url(&state.base_url, &qr_code.code),
            "message": "Código QR creado correctamente",
        })),
    ))
}

/// Update a QR code by ID (PUT /api/admin/qr-codes/{id}).
///
/// The code string and the venue are fixed at creation; this adjusts
/// the label, active flag, expiry, and use limit.
pub async fn update_qr_code(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQrCode>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut qr_code = state
        .content
        .get_qr_code(id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::QrCode, id.to_string()))?;

    payload.apply_to(&mut qr_code);

    state.content.update_qr_code(&qr_code).await?;

    tracing::info!(qr_id = %id, code = %qr_code.code, "Updated QR code");

    Ok(Json(json!({
        "success": true,
        "qr_code": qr_code.clone(),
        "access_url": qr::access_url(&state.base_url, &qr_code.code),
        "download_url": qr::download_url(&state.base_url, &qr_code.code),
        "message": "Código QR actualizado correctamente",
    })))
}

/// Delete a QR code by ID (DELETE /api/admin/qr-codes/{id}).
///
/// Feedback already collected through the code is kept.
pub async fn delete_qr_code(
    State(state): State<AppState>,
    _editor: CurrentEditor,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.content.delete_qr_code(id).await?;

    tracing::info!(qr_id = %id, "Deleted QR code");

    Ok(Json(json!({
        "success": true,
        "message": "Código QR eliminado correctamente",
    })))
}

/// Attach the landing and download URLs the admin panel shows next to
/// each code.
fn with_urls(state: &AppState, qr_code: QrCode) -> serde_json::Value {
    let access_url = qr::access_url(&state.base_url, &qr_code.code);
    let download_url = qr::download_url(&state.base_url, &qr_code.code);

    json!({
        "qr_code": qr_code,
        "access_url": access_url,
        "download_url": download_url,
    })
}
