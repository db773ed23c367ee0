//! HTTP client for the tapeo admin API.

pub mod categories;
pub mod cities;
pub mod guides;
pub mod health;
pub mod reviews;
pub mod seed;
pub mod users;
pub mod venues;

use crate::error::{ClientError, Result};

/// Header carrying the shared provisioning secret.
const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// HTTP client for the tapeo admin API.
///
/// Content endpoints need an editor session; call [`TapeoClient::login`]
/// first. The user endpoints also accept the deploy secret, sent as the
/// `x-admin-secret` header when one is configured.
#[derive(Debug, Clone)]
pub struct TapeoClient {
    client: reqwest::Client,
    base_url: String,
    admin_secret: Option<String>,
}

impl TapeoClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>, admin_secret: Option<String>) -> Result<Self> {
        // The session cookie from `login` lives in the jar for the rest
        // of the process. Redirects stay unfollowed so a login 303
        // doesn't turn into a page fetch.
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            admin_secret,
        })
    }

    /// Create from environment (`TAPEO_URL`, `ADMIN_API_SECRET`).
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("TAPEO_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let admin_secret = std::env::var("ADMIN_API_SECRET")
            .ok()
            .filter(|v| !v.is_empty());
        Self::new(base_url, admin_secret)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign in with editor credentials and keep the session cookie.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status.is_redirection() {
            Ok(())
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request with the provisioning secret attached when set.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.admin_secret {
            Some(secret) => builder.header(ADMIN_SECRET_HEADER, secret),
            None => builder,
        }
    }

    /// Handle a response whose body is the document itself.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if response.status().is_success() {
            response.json().await.map_err(ClientError::from)
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Handle a mutation response that wraps the document in an
    /// envelope, e.g. `{"success": true, "city": {...}}`.
    async fn handle_envelope<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        key: &str,
    ) -> Result<T> {
        let value: serde_json::Value = self.handle_response(response).await?;
        let document = value
            .get(key)
            .cloned()
            .ok_or_else(|| ClientError::InvalidResponse(format!("missing `{key}` in response")))?;
        Ok(serde_json::from_value(document)?)
    }

    /// Handle a response where only success matters.
    async fn handle_ok(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Turn an error response into a [`ClientError`], preferring the
    /// server's `{"error": "..."}` message over the raw body.
    async fn error_from_response(&self, response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|e| e.as_str())
                    .map(String::from)
            })
            .unwrap_or(body);

        if status == 404 {
            ClientError::NotFound { resource: message }
        } else {
            ClientError::ServerError { status, message }
        }
    }
}
