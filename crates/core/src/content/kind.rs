use serde::{Deserialize, Serialize};

/// The document kinds stored in the content dataset.
///
/// The serialized form matches the `_type` field of the stored
/// documents, so queries can filter on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    City,
    Venue,
    Review,
    Category,
    Guide,
    QrCode,
    QrFeedback,
    FeaturedItem,
    HomepageSection,
}

impl ContentKind {
    /// The `_type` value used for documents of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Venue => "venue",
            Self::Review => "review",
            Self::Category => "category",
            Self::Guide => "guide",
            Self::QrCode => "qrCode",
            Self::QrFeedback => "qrFeedback",
            Self::FeaturedItem => "featuredItem",
            Self::HomepageSection => "homepageSection",
        }
    }

    /// Singular noun with its indefinite article, used to build
    /// user-facing conflict messages.
    pub fn singular_indefinite(&self) -> &'static str {
        match self {
            Self::City => "una ciudad",
            Self::Venue => "un local",
            Self::Review => "una reseña",
            Self::Category => "una categoría",
            Self::Guide => "una guía",
            Self::QrCode => "un código QR",
            Self::QrFeedback => "un comentario",
            Self::FeaturedItem => "un destacado",
            Self::HomepageSection => "una sección de portada",
        }
    }

    /// Plural noun with gender agreement on "asociados", used to build
    /// deletion-guard messages.
    pub fn plural_associated(&self) -> &'static str {
        match self {
            Self::City => "ciudades asociadas",
            Self::Venue => "locales asociados",
            Self::Review => "reseñas asociadas",
            Self::Category => "categorías asociadas",
            Self::Guide => "guías asociadas",
            Self::QrCode => "códigos QR asociados",
            Self::QrFeedback => "comentarios asociados",
            Self::FeaturedItem => "destacados asociados",
            Self::HomepageSection => "secciones asociadas",
        }
    }

    /// Complete not-found message for this kind.
    pub fn not_found_message(&self) -> &'static str {
        match self {
            Self::City => "Ciudad no encontrada",
            Self::Venue => "Local no encontrado",
            Self::Review => "Reseña no encontrada",
            Self::Category => "Categoría no encontrada",
            Self::Guide => "Guía no encontrada",
            Self::QrCode => "Código QR no encontrado",
            Self::QrFeedback => "Comentario no encontrado",
            Self::FeaturedItem => "Destacado no encontrado",
            Self::HomepageSection => "Sección no encontrada",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_are_camel_case() {
        assert_eq!(ContentKind::Venue.type_name(), "venue");
        assert_eq!(ContentKind::QrCode.type_name(), "qrCode");
        assert_eq!(ContentKind::HomepageSection.type_name(), "homepageSection");
    }

    #[test]
    fn test_serde_round_trip_matches_type_name() {
        for kind in [
            ContentKind::City,
            ContentKind::Venue,
            ContentKind::Review,
            ContentKind::Category,
            ContentKind::Guide,
            ContentKind::QrCode,
            ContentKind::QrFeedback,
            ContentKind::FeaturedItem,
            ContentKind::HomepageSection,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.type_name()));
            let back: ContentKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_spanish_articles_agree() {
        assert_eq!(ContentKind::Venue.singular_indefinite(), "un local");
        assert_eq!(ContentKind::Category.singular_indefinite(), "una categoría");
        assert_eq!(ContentKind::Review.plural_associated(), "reseñas asociadas");
        assert_eq!(ContentKind::Venue.plural_associated(), "locales asociados");
    }
}
