use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Auth error for the tapeo_auth crate.
///
/// Wraps the core `AuthError` so handlers can bubble validation and
/// storage failures straight into an HTTP response. The status code
/// comes from the core mapping; bodies use the JSON error envelope.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct AuthError(#[from] pub tapeo_core::auth::AuthError);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            tracing::error!("auth error: {}", self.0);
            "Error interno del servidor".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
