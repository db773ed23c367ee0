//! Review API operations.

use chrono::NaiveDate;
use tapeo_core::content::{Ratings, Review};
use uuid::Uuid;

use super::TapeoClient;
use crate::error::Result;

/// Request body for creating a review.
#[derive(Debug, serde::Serialize)]
pub struct CreateReviewRequest {
    pub venue_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Ratings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<NaiveDate>,
    pub published: bool,
}

impl TapeoClient {
    /// List reviews, optionally scoped to a venue.
    pub async fn list_reviews(&self, venue_id: Option<Uuid>) -> Result<Vec<Review>> {
        let path = match venue_id {
            Some(id) => format!("/api/admin/reviews?venue_id={}", id),
            None => "/api/admin/reviews".to_string(),
        };
        let response = self.request(reqwest::Method::GET, &path).send().await?;
        self.handle_response(response).await
    }

    /// Create a new review.
    pub async fn create_review(&self, request: CreateReviewRequest) -> Result<Review> {
        let response = self
            .request(reqwest::Method::POST, "/api/admin/reviews")
            .json(&request)
            .send()
            .await?;
        self.handle_envelope(response, "review").await
    }

    /// Get review by ID.
    pub async fn get_review(&self, id: Uuid) -> Result<Review> {
        let response = self
            .request(reqwest::Method::GET, &format!("/api/admin/reviews/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete review by ID.
    pub async fn delete_review(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/api/admin/reviews/{}", id),
            )
            .send()
            .await?;
        self.handle_ok(response).await
    }
}
