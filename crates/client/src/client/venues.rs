//! Venue API operations.

use super::TapeoClient;
use crate::error::Result;
use tapeo_core::content::{GeoPoint, PriceRange, Venue};
use uuid::Uuid;

/// Request body for creating a venue.
#[derive(Debug, serde::Serialize)]
pub struct CreateVenueRequest {
    pub city_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category_ids: Vec<Uuid>,
}

impl TapeoClient {
    /// List venues, optionally scoped to a city.
    pub async fn list_venues(&self, city_id: Option<Uuid>) -> Result<Vec<Venue>> {
        let path = match city_id {
            Some(id) => format!("/api/admin/venues?city_id={}", id),
            None => "/api/admin/venues".to_string(),
        };
        let response = self.request(reqwest::Method::GET, &path).send().await?;
        self.handle_response(response).await
    }

    /// Create a new venue.
    pub async fn create_venue(&self, request: CreateVenueRequest) -> Result<Venue> {
        let response = self
            .request(reqwest::Method::POST, "/api/admin/venues")
            .json(&request)
            .send()
            .await?;
        self.handle_envelope(response, "venue").await
    }

    /// Get venue by ID.
    pub async fn get_venue(&self, id: Uuid) -> Result<Venue> {
        let response = self
            .request(reqwest::Method::GET, &format!("/api/admin/venues/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete venue by ID.
    pub async fn delete_venue(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/api/admin/venues/{}", id),
            )
            .send()
            .await?;
        self.handle_ok(response).await
    }
}
