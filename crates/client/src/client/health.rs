//! Health check operations.

use serde::{Deserialize, Serialize};

use super::TapeoClient;
use crate::error::Result;

/// Readiness probe response.
#[derive(Debug, Serialize, Deserialize)]
pub struct Readiness {
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TapeoClient {
    /// Liveness probe: is the server accepting connections.
    pub async fn health_live(&self) -> Result<()> {
        let response = self.request(reqwest::Method::GET, "/livez").send().await?;
        self.handle_ok(response).await
    }

    /// Readiness probe: can the server reach its content store.
    ///
    /// A 503 still carries a body, so the probe result is returned
    /// rather than treated as a request failure.
    pub async fn health_ready(&self) -> Result<Readiness> {
        let response = self.request(reqwest::Method::GET, "/readyz").send().await?;
        if response.status().is_success() || response.status().as_u16() == 503 {
            response.json().await.map_err(crate::error::ClientError::from)
        } else {
            Err(self.error_from_response(response).await)
        }
    }
}
