//! User provisioning operations.

use super::TapeoClient;
use crate::error::Result;
use tapeo_core::auth::{Role, User};
use uuid::Uuid;

/// Request body for creating a user.
#[derive(Debug, serde::Serialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl TapeoClient {
    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let response = self
            .request(reqwest::Method::GET, "/api/admin/users")
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new user.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let response = self
            .request(reqwest::Method::POST, "/api/admin/users")
            .json(&request)
            .send()
            .await?;
        self.handle_envelope(response, "user").await
    }

    /// Get user by ID.
    pub async fn get_user(&self, id: Uuid) -> Result<User> {
        let response = self
            .request(reqwest::Method::GET, &format!("/api/admin/users/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete user by ID.
    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/api/admin/users/{}", id))
            .send()
            .await?;
        self.handle_ok(response).await
    }
}
