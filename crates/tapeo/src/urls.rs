//! Public URL paths for content documents.
//!
//! Every place that links to a page (templates, sitemaps, JSON-LD,
//! IndexNow submissions) builds the path here so the URL scheme lives
//! in one spot.

/// Path of a city page: `/{city}`.
pub fn city_path(city_slug: &str) -> String {
    format!("/{city_slug}")
}

/// Path of a venue page: `/{city}/{venue}`.
pub fn venue_path(city_slug: &str, venue_slug: &str) -> String {
    format!("/{city_slug}/{venue_slug}")
}

/// Path of a review page: `/{city}/{venue}/review/{slug}`.
pub fn review_path(city_slug: &str, venue_slug: &str, review_slug: &str) -> String {
    format!("/{city_slug}/{venue_slug}/review/{review_slug}")
}

/// Path of a guide page: `/guias/{slug}`.
pub fn guide_path(guide_slug: &str) -> String {
    format!("/guias/{guide_slug}")
}

/// Path of a category listing page: `/categorias/{slug}`.
pub fn category_path(category_slug: &str) -> String {
    format!("/categorias/{category_slug}")
}

/// Join a path onto the site base URL.
///
/// The base is stored without a trailing slash (see [`crate::config::Config`]),
/// so this is plain concatenation.
pub fn absolute(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_nest_by_slug() {
        assert_eq!(city_path("sevilla"), "/sevilla");
        assert_eq!(venue_path("sevilla", "casa-paco"), "/sevilla/casa-paco");
        assert_eq!(
            review_path("sevilla", "casa-paco", "tapas-de-otono"),
            "/sevilla/casa-paco/review/tapas-de-otono"
        );
        assert_eq!(guide_path("ruta-del-vermut"), "/guias/ruta-del-vermut");
        assert_eq!(category_path("marisquerias"), "/categorias/marisquerias");
    }

    #[test]
    fn absolute_prepends_base() {
        assert_eq!(
            absolute("https://tapeo.example", "/sevilla"),
            "https://tapeo.example/sevilla"
        );
    }
}
