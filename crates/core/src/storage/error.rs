use thiserror::Error;

use crate::content::ContentKind;

/// Errors that can occur during content store operations.
///
/// The conflict and validation variants carry user-facing Spanish
/// messages because the admin UI shows them verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("{}", .kind.not_found_message())]
    NotFound { kind: ContentKind, id: String },

    #[error("Ya existe {} con este slug", .kind.singular_indefinite())]
    SlugConflict { kind: ContentKind },

    #[error("No se puede eliminar {} que tiene {}", .kind.singular_indefinite(), .children.plural_associated())]
    HasChildren {
        kind: ContentKind,
        children: ContentKind,
    },

    #[error("El campo '{field}' es obligatorio")]
    MissingField { field: &'static str },

    #[error("{0}")]
    InvalidData(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ContentError {
    pub fn not_found(kind: ContentKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn slug_conflict(kind: ContentKind) -> Self {
        Self::SlugConflict { kind }
    }

    pub fn has_children(kind: ContentKind, children: ContentKind) -> Self {
        Self::HasChildren { kind, children }
    }
}

/// Result type for content store operations.
pub type Result<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = ContentError::not_found(ContentKind::Category, "abc-123");
        assert_eq!(error.to_string(), "Categoría no encontrada");
    }

    #[test]
    fn test_slug_conflict_display() {
        let error = ContentError::slug_conflict(ContentKind::Category);
        assert_eq!(error.to_string(), "Ya existe una categoría con este slug");

        let error = ContentError::slug_conflict(ContentKind::Venue);
        assert_eq!(error.to_string(), "Ya existe un local con este slug");
    }

    #[test]
    fn test_has_children_display() {
        let error = ContentError::has_children(ContentKind::Venue, ContentKind::Review);
        assert_eq!(
            error.to_string(),
            "No se puede eliminar un local que tiene reseñas asociadas"
        );

        let error = ContentError::has_children(ContentKind::Category, ContentKind::Venue);
        assert_eq!(
            error.to_string(),
            "No se puede eliminar una categoría que tiene locales asociados"
        );

        let error = ContentError::has_children(ContentKind::City, ContentKind::Venue);
        assert_eq!(
            error.to_string(),
            "No se puede eliminar una ciudad que tiene locales asociados"
        );
    }

    #[test]
    fn test_missing_field_display() {
        let error = ContentError::MissingField { field: "title" };
        assert_eq!(error.to_string(), "El campo 'title' es obligatorio");
    }

    #[test]
    fn test_invalid_data_display() {
        let error = ContentError::InvalidData("La URL no es válida".to_string());
        assert_eq!(error.to_string(), "La URL no es válida");
    }

    #[test]
    fn test_query_failed_display() {
        let error = ContentError::QueryFailed("unexpected token".to_string());
        assert_eq!(error.to_string(), "Query failed: unexpected token");
    }

    #[test]
    fn test_connection_failed_display() {
        let error = ContentError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }
}
