//! Error types for API and page handlers.
//!
//! API handlers answer with a JSON envelope `{"error": "..."}`; page
//! handlers answer with a rendered template. Both wrap `anyhow::Error`
//! so `?` works on any error in a handler body, and both downcast to
//! [`ContentError`] to recover the HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tapeo_core::{
    auth::AuthError,
    storage::{content_error_to_status_code, ContentError},
};

use crate::handlers::pages::{ErrorTemplate, HtmlTemplate, NotFoundTemplate};

/// Error returned from JSON API handlers.
pub struct ApiError(pub anyhow::Error);

/// Access-check failure carrying the status the extractor rejected with.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct Denied {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    /// Wraps an extractor rejection so it keeps its status and message.
    pub fn denied(status: StatusCode, message: &'static str) -> Self {
        Self(anyhow::Error::new(Denied { status, message }))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Denied errors carry a deliberate user-facing message, so they
        // skip the generic-message masking below even on a 500.
        if let Some(denied) = self.0.downcast_ref::<Denied>() {
            if denied.status.is_server_error() {
                tracing::error!(error = %self.0, "Request failed");
            }
            return (
                denied.status,
                Json(serde_json::json!({ "error": denied.message })),
            )
                .into_response();
        }

        let status_code = if let Some(content_error) = self.0.downcast_ref::<ContentError>() {
            let code = content_error_to_status_code(content_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if let Some(auth_error) = self.0.downcast_ref::<AuthError>() {
            StatusCode::from_u16(auth_error.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        // Infrastructure failures are logged with detail but reported
        // with a generic message.
        let message = if status_code.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
            "Error interno del servidor".to_string()
        } else {
            self.0.to_string()
        };

        (
            status_code,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Error returned from HTML page handlers.
///
/// Unknown slugs render the 404 page; anything else renders the error
/// page with a 500.
pub struct PageError(pub anyhow::Error);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if let Some(ContentError::NotFound { .. }) = self.0.downcast_ref::<ContentError>() {
            return not_found_page();
        }

        tracing::error!(error = %self.0, "Failed to build page");
        (StatusCode::INTERNAL_SERVER_ERROR, HtmlTemplate(ErrorTemplate)).into_response()
    }
}

/// The 404 page, also used directly by page handlers that resolve
/// slugs by hand.
pub fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, HtmlTemplate(NotFoundTemplate)).into_response()
}

impl<E> From<E> for PageError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn content_errors_map_to_their_status() {
        let err = ApiError::from(ContentError::not_found(
            tapeo_core::content::ContentKind::Venue,
            Uuid::nil().to_string(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let err = ApiError::from(ContentError::slug_conflict(
            tapeo_core::content::ContentKind::Category,
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_errors_map_to_500() {
        let err = ApiError::from(anyhow::anyhow!("boom"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn denied_keeps_status_and_message() {
        let err = ApiError::denied(StatusCode::FORBIDDEN, "Solo administradores");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Unlike other 500s, a denied 500 keeps its message.
        let err = ApiError::denied(
            StatusCode::INTERNAL_SERVER_ERROR,
            "No se pudo generar el código QR",
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn page_not_found_renders_404() {
        let err = PageError::from(ContentError::not_found(
            tapeo_core::content::ContentKind::City,
            Uuid::nil().to_string(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
