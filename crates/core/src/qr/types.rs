use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::ContentError;

/// A printable QR code tied to a venue.
///
/// The `code` string is what the printed QR image encodes (via the scan
/// URL); it is unique across all venues. Usage limits and expiry are
/// optional restrictions checked at scan time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCode {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub code: String,
    /// Free-form admin label, e.g. "Mesa 3" or "Barra".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub current_uses: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl QrCode {
    pub fn new(venue_id: Uuid, code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            venue_id,
            code: code.into(),
            label: None,
            is_active: true,
            expires_at: None,
            max_uses: None,
            current_uses: 0,
            last_used_at: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    pub fn with_uses(mut self, current_uses: u32) -> Self {
        self.current_uses = current_uses;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn has_uses_remaining(&self) -> bool {
        match self.max_uses {
            Some(max) => self.current_uses < max,
            None => true,
        }
    }
}

/// Moderation state of a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Pending,
    Processed,
    Archived,
}

impl std::fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processed => write!(f, "processed"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// Feedback a visitor left after scanning a code.
///
/// Name, email and star rating are optional; the message is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrFeedback {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub qr_code_id: Uuid,
    pub message: String,
    /// Star rating from the landing page, 1 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor_email: Option<String>,
    pub status: FeedbackStatus,
    pub created_at: DateTime<Utc>,
}

impl QrFeedback {
    pub fn new(venue_id: Uuid, qr_code_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            venue_id,
            qr_code_id,
            message: message.into(),
            rating: None,
            visitor_name: None,
            visitor_email: None,
            status: FeedbackStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_visitor(
        mut self,
        name: Option<String>,
        email: Option<String>,
    ) -> Self {
        self.visitor_name = name;
        self.visitor_email = email;
        self
    }

    pub fn with_status(mut self, status: FeedbackStatus) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.message.trim().is_empty() {
            return Err(ContentError::MissingField { field: "message" });
        }
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(ContentError::InvalidData(
                    "La valoración debe estar entre 1 y 5".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_code_is_active_and_unused() {
        let code = QrCode::new(Uuid::new_v4(), "ABC123");
        assert!(code.is_active);
        assert_eq!(code.current_uses, 0);
        assert!(code.has_uses_remaining());
    }

    #[test]
    fn test_uses_remaining_with_limit() {
        let code = QrCode::new(Uuid::new_v4(), "ABC123").with_max_uses(2);
        assert!(code.has_uses_remaining());
        assert!(code.clone().with_uses(1).has_uses_remaining());
        assert!(!code.with_uses(2).has_uses_remaining());
    }

    #[test]
    fn test_feedback_requires_message() {
        let feedback = QrFeedback::new(Uuid::new_v4(), Uuid::new_v4(), "  ");
        assert_eq!(
            feedback.validate(),
            Err(ContentError::MissingField { field: "message" })
        );
    }

    #[test]
    fn test_feedback_rating_range() {
        let venue_id = Uuid::new_v4();
        let qr_id = Uuid::new_v4();
        assert!(QrFeedback::new(venue_id, qr_id, "Buenísimo")
            .with_rating(5)
            .validate()
            .is_ok());
        assert!(QrFeedback::new(venue_id, qr_id, "Buenísimo")
            .with_rating(0)
            .validate()
            .is_err());
        assert!(QrFeedback::new(venue_id, qr_id, "Buenísimo")
            .with_rating(6)
            .validate()
            .is_err());
    }

    #[test]
    fn test_feedback_starts_pending() {
        let feedback = QrFeedback::new(Uuid::new_v4(), Uuid::new_v4(), "Muy rico todo");
        assert_eq!(feedback.status, FeedbackStatus::Pending);
    }

    #[test]
    fn test_status_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::Processed).unwrap(),
            "\"processed\""
        );
        let parsed: FeedbackStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(parsed, FeedbackStatus::Archived);
    }
}
