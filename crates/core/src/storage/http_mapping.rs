//! Pure functions for mapping content store errors to HTTP status codes.
//!
//! This module provides HTTP status code mappings for [`ContentError`] variants,
//! following the Functional Core pattern - pure functions with no side effects.

use super::ContentError;

/// Maps a [`ContentError`] to an HTTP status code.
///
/// This is a pure function that returns the appropriate HTTP status code
/// for each error variant:
///
/// - `NotFound` -> 404 (Not Found)
/// - `SlugConflict` -> 400 (Bad Request)
/// - `HasChildren` -> 400 (Bad Request)
/// - `MissingField` -> 400 (Bad Request)
/// - `InvalidData` -> 400 (Bad Request)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `Serialization` -> 500 (Internal Server Error)
///
/// Slug conflicts and blocked deletions report 400 rather than 409; the
/// admin API treats every rejected form submission as a plain client
/// error with a message.
///
/// # Examples
///
/// ```
/// use tapeo_core::content::ContentKind;
/// use tapeo_core::storage::{content_error_to_status_code, ContentError};
///
/// let error = ContentError::not_found(ContentKind::Venue, "abc-123");
/// assert_eq!(content_error_to_status_code(&error), 404);
/// ```
pub fn content_error_to_status_code(error: &ContentError) -> u16 {
    match error {
        ContentError::NotFound { .. } => 404,
        ContentError::SlugConflict { .. } => 400,
        ContentError::HasChildren { .. } => 400,
        ContentError::MissingField { .. } => 400,
        ContentError::InvalidData(_) => 400,
        ContentError::QueryFailed(_) => 500,
        ContentError::ConnectionFailed(_) => 503,
        ContentError::Serialization(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = ContentError::not_found(ContentKind::City, "madrid");
        assert_eq!(content_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_slug_conflict_maps_to_400() {
        let error = ContentError::slug_conflict(ContentKind::Category);
        assert_eq!(content_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_has_children_maps_to_400() {
        let error = ContentError::has_children(ContentKind::Venue, ContentKind::Review);
        assert_eq!(content_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_missing_field_maps_to_400() {
        let error = ContentError::MissingField { field: "title" };
        assert_eq!(content_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_invalid_data_maps_to_400() {
        let error = ContentError::InvalidData("Slug no válido: X".to_string());
        assert_eq!(content_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_query_failed_maps_to_500() {
        let error = ContentError::QueryFailed("invalid query syntax".to_string());
        assert_eq!(content_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = ContentError::ConnectionFailed("dns lookup failed".to_string());
        assert_eq!(content_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_serialization_maps_to_500() {
        let error = ContentError::Serialization("failed to parse JSON".to_string());
        assert_eq!(content_error_to_status_code(&error), 500);
    }
}
