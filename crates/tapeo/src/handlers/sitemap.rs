//! Sitemap routes.
//!
//! Responses carry a CDN cache header. A store outage degrades to a
//! minimal valid urlset instead of a 5xx.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{sitemap, state::AppState};

const CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

fn xml_response(body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/xml; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        body,
    )
        .into_response()
}

/// GET /sitemap.xml - index pointing at the per-kind sitemaps.
pub async fn sitemap_index(State(state): State<AppState>) -> Response {
    xml_response(sitemap::index(&state.base_url, Utc::now()))
}

/// GET /sitemap-venues.xml
pub async fn venues_sitemap(State(state): State<AppState>) -> Response {
    match state.content.venue_stamps().await {
        Ok(stamps) => xml_response(sitemap::urlset(&sitemap::venue_urls(
            &state.base_url,
            &stamps,
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to minimal venues sitemap");
            xml_response(sitemap::fallback(&state.base_url, Utc::now()))
        }
    }
}

/// GET /sitemap-reviews.xml
pub async fn reviews_sitemap(State(state): State<AppState>) -> Response {
    match state.content.review_stamps().await {
        Ok(stamps) => xml_response(sitemap::urlset(&sitemap::review_urls(
            &state.base_url,
            &stamps,
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to minimal reviews sitemap");
            xml_response(sitemap::fallback(&state.base_url, Utc::now()))
        }
    }
}

/// GET /sitemap-guides.xml
pub async fn guides_sitemap(State(state): State<AppState>) -> Response {
    match state.content.guide_stamps().await {
        Ok(stamps) => xml_response(sitemap::urlset(&sitemap::guide_urls(
            &state.base_url,
            &stamps,
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to minimal guides sitemap");
            xml_response(sitemap::fallback(&state.base_url, Utc::now()))
        }
    }
}

/// GET /sitemap-static.xml - homepage, guide index and city pages.
pub async fn static_sitemap(State(state): State<AppState>) -> Response {
    let now = Utc::now();
    match state.content.list_cities().await {
        Ok(cities) => xml_response(sitemap::urlset(&sitemap::static_urls(
            &state.base_url,
            &cities,
            now,
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to minimal static sitemap");
            xml_response(sitemap::fallback(&state.base_url, now))
        }
    }
}
