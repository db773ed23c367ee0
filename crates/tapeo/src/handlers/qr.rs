//! Public QR surface: the scan landing page, the feedback endpoint,
//! and the printable PNG download.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use tapeo_core::auth::{Notification, NotificationKind};
use tapeo_core::content::ContentKind;
use tapeo_core::qr::{self, evaluate_qr_code};
use tapeo_core::storage::ContentError;

use crate::{
    handlers::{
        error::{not_found_page, ApiError, PageError},
        pages::{HtmlTemplate, QrInvalidTemplate, QrLandingTemplate},
    },
    models::FeedbackSubmission,
    qr_image,
    state::AppState,
};

/// Scan landing page (GET /qr/{code}).
///
/// Valid codes record one use and show the venue with the feedback
/// form. Inactive, expired, and exhausted codes get a friendly
/// rejection page; unknown codes fall through to the 404.
pub async fn qr_landing(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, PageError> {
    let Some(qr_code) = state.content.find_qr_code(&code).await? else {
        return Ok(not_found_page());
    };

    let validity = evaluate_qr_code(&qr_code, Utc::now());
    if let Some(reason) = validity.reason {
        tracing::info!(code = %qr_code.code, reason, "Rejected QR scan");
        return Ok((StatusCode::GONE, HtmlTemplate(QrInvalidTemplate { reason })).into_response());
    }

    let venue = state
        .content
        .get_venue(qr_code.venue_id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::Venue, qr_code.venue_id.to_string()))?;
    let city = state
        .content
        .get_city(venue.city_id)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::City, venue.city_id.to_string()))?;

    // Use counting is best effort; a storage hiccup must not turn a
    // valid scan into an error page.
    if let Err(e) = state.content.record_qr_use(qr_code.id, Utc::now()).await {
        tracing::warn!(error = %e, code = %qr_code.code, "Failed to record QR use");
    }

    tracing::info!(code = %qr_code.code, venue = %venue.slug, "QR scan");

    Ok(HtmlTemplate(QrLandingTemplate {
        code: qr_code.code.clone(),
        venue,
        city,
    })
    .into_response())
}

/// Visitor feedback from the landing page (POST /api/qr/feedback).
///
/// Resolves and re-checks the code, stores the feedback as pending,
/// and notifies every admin. Notification failures are logged, not
/// reported to the visitor.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(payload): Json<FeedbackSubmission>,
) -> Result<impl IntoResponse, ApiError> {
    let qr_code = state
        .content
        .find_qr_code(&payload.code)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::QrCode, payload.code.clone()))?;

    let validity = evaluate_qr_code(&qr_code, Utc::now());
    if let Some(reason) = validity.reason {
        return Err(ContentError::InvalidData(reason.to_string()).into());
    }

    let feedback = payload.into_feedback(qr_code.venue_id, qr_code.id);
    feedback.validate()?;

    state.content.create_feedback(&feedback).await?;

    tracing::info!(feedback_id = %feedback.id, code = %qr_code.code, "Stored visitor feedback");

    notify_admins(&state, qr_code.venue_id).await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Gracias por tu comentario",
        })),
    ))
}

/// Printable QR image (GET /api/qr/download/{code}).
///
/// Serves the PNG for the code's landing URL. No validity gate: codes
/// are printed before they go live.
pub async fn download_qr_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let qr_code = state
        .content
        .find_qr_code(&code)
        .await?
        .ok_or_else(|| ContentError::not_found(ContentKind::QrCode, code.clone()))?;

    let url = qr::access_url(&state.base_url, &qr_code.code);
    let png = qr_image::render_png(&url).map_err(|e| {
        tracing::error!(error = %e, code = %qr_code.code, "Failed to render QR image");
        ApiError::denied(
            StatusCode::INTERNAL_SERVER_ERROR,
            "No se pudo generar el código QR",
        )
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"qr-{}.png\"", qr_code.code),
            ),
        ],
        png,
    ))
}

/// Drop a "new feedback" notification on every admin's bell.
async fn notify_admins(state: &AppState, venue_id: uuid::Uuid) {
    let venue_title = match state.content.get_venue(venue_id).await {
        Ok(Some(venue)) => venue.title,
        Ok(None) => "un local".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to resolve venue for feedback notification");
            "un local".to_string()
        }
    };

    let users = match state.auth.users.list_users().await {
        Ok(users) => users,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to list users for feedback notification");
            return;
        }
    };

    let message = format!("Nuevo comentario de un visitante en {venue_title}");
    for user in users.iter().filter(|u| u.is_admin()) {
        let notification = Notification::new(user.id, NotificationKind::QrFeedback, &message);
        if let Err(e) = state.auth.notifications.create_notification(&notification).await {
            tracing::warn!(error = %e, user_id = %user.id, "Failed to create notification");
        }
    }
}
