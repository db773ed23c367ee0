//! Slug derivation and validation.
//!
//! Slugs are the URL identity of every public document. They are
//! derived once from the title when a document is created and kept
//! stable afterwards so published URLs never break.

use std::sync::OnceLock;

use regex::Regex;

fn slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid")
    })
}

/// Whether a string is an acceptable slug: lowercase ASCII segments
/// joined by single hyphens, no leading or trailing hyphen.
pub fn is_valid_slug(slug: &str) -> bool {
    slug_regex().is_match(slug)
}

/// Derives a slug from a display title.
///
/// Lowercases, folds Spanish accented characters to ASCII, and turns
/// every run of non-alphanumeric characters into a single hyphen.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars().flat_map(char::to_lowercase) {
        let folded = match c {
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        };
        if folded.is_ascii_alphanumeric() {
            slug.push(folded);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases() {
        assert_eq!(slugify("Tapas"), "tapas");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Café Ñoño"), "cafe-nono");
        assert_eq!(slugify("Málaga"), "malaga");
        assert_eq!(slugify("El Rincón de la Abuela"), "el-rincon-de-la-abuela");
    }

    #[test]
    fn test_slugify_collapses_symbol_runs() {
        assert_eq!(slugify("Bar & Grill"), "bar-grill");
        assert_eq!(slugify("Casa -- Paco"), "casa-paco");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  ¡Tapas!  "), "tapas");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify("Vermutería 1900"), "vermuteria-1900");
    }

    #[test]
    fn test_valid_slugs() {
        assert!(is_valid_slug("tapas"));
        assert!(is_valid_slug("la-tasca-2"));
        assert!(is_valid_slug("a"));
    }

    #[test]
    fn test_invalid_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("La-Tasca"));
        assert!(!is_valid_slug("-tapas"));
        assert!(!is_valid_slug("tapas-"));
        assert!(!is_valid_slug("a--b"));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("ñoño"));
    }

    #[test]
    fn test_slugify_output_is_valid() {
        for title in ["Café Ñoño", "Bar & Grill", "Vermutería 1900", "A"] {
            assert!(is_valid_slug(&slugify(title)), "title: {title}");
        }
    }
}
