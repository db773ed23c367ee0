//! Guide API operations.

use tapeo_core::content::{Guide, Recipe};

use super::TapeoClient;
use crate::error::Result;

/// Request body for creating a guide.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CreateGuideRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub published: bool,
}

impl TapeoClient {
    /// List all guides.
    pub async fn list_guides(&self) -> Result<Vec<Guide>> {
        let response = self
            .request(reqwest::Method::GET, "/api/admin/guides")
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new guide.
    pub async fn create_guide(&self, request: CreateGuideRequest) -> Result<Guide> {
        let response = self
            .request(reqwest::Method::POST, "/api/admin/guides")
            .json(&request)
            .send()
            .await?;
        self.handle_envelope(response, "guide").await
    }
}
