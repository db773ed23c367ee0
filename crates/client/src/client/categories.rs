//! Category API operations.

use super::TapeoClient;
use crate::error::Result;
use tapeo_core::content::Category;
use uuid::Uuid;

/// Request body for creating a category.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CreateCategoryRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TapeoClient {
    /// List all categories.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let response = self
            .request(reqwest::Method::GET, "/api/admin/categories")
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new category.
    pub async fn create_category(&self, request: CreateCategoryRequest) -> Result<Category> {
        let response = self
            .request(reqwest::Method::POST, "/api/admin/categories")
            .json(&request)
            .send()
            .await?;
        self.handle_envelope(response, "category").await
    }

    /// Get category by ID.
    pub async fn get_category(&self, id: Uuid) -> Result<Category> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/api/admin/categories/{}", id),
            )
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete category by ID.
    pub async fn delete_category(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/api/admin/categories/{}", id),
            )
            .send()
            .await?;
        self.handle_ok(response).await
    }
}
