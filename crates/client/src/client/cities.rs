//! City API operations.

use super::TapeoClient;
use crate::error::Result;
use tapeo_core::content::City;
use uuid::Uuid;

/// Request body for creating a city.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CreateCityRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl TapeoClient {
    /// List all cities.
    pub async fn list_cities(&self) -> Result<Vec<City>> {
        let response = self
            .request(reqwest::Method::GET, "/api/admin/cities")
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new city.
    pub async fn create_city(&self, request: CreateCityRequest) -> Result<City> {
        let response = self
            .request(reqwest::Method::POST, "/api/admin/cities")
            .json(&request)
            .send()
            .await?;
        self.handle_envelope(response, "city").await
    }

    /// Get city by ID.
    pub async fn get_city(&self, id: Uuid) -> Result<City> {
        let response = self
            .request(reqwest::Method::GET, &format!("/api/admin/cities/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete city by ID.
    pub async fn delete_city(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/api/admin/cities/{}", id),
            )
            .send()
            .await?;
        self.handle_ok(response).await
    }
}
