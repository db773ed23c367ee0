use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use tapeo_core::qr::{generate_unique_code, FeedbackStatus, QrCode, QrFeedback};
use tapeo_core::serde::{deserialize_optional_string, deserialize_optional_u32};

/// Request payload for creating a QR code.
#[derive(Debug, Deserialize)]
pub struct CreateQrCode {
    pub venue_id: Uuid,
    /// Explicit code string; generated when absent.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_u32")]
    pub max_uses: Option<u32>,
}

impl CreateQrCode {
    pub fn into_qr_code(self) -> QrCode {
        let code = match self.code {
            Some(code) if !code.trim().is_empty() => code,
            _ => generate_unique_code(),
        };
        let mut qr_code = QrCode::new(self.venue_id, code);
        if let Some(label) = self.label {
            qr_code = qr_code.with_label(label);
        }
        if let Some(expires_at) = self.expires_at {
            qr_code = qr_code.with_expires_at(expires_at);
        }
        if let Some(max_uses) = self.max_uses {
            qr_code = qr_code.with_max_uses(max_uses);
        }
        qr_code
    }
}

/// Request payload for updating a QR code.
///
/// The code string and the venue are fixed at creation; printed codes
/// must keep resolving to the same place.
#[derive(Debug, Deserialize)]
pub struct UpdateQrCode {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_u32")]
    pub max_uses: Option<u32>,
}

impl UpdateQrCode {
    pub fn apply_to(self, qr_code: &mut QrCode) {
        if let Some(label) = self.label {
            qr_code.label = Some(label);
        }
        if let Some(is_active) = self.is_active {
            qr_code.is_active = is_active;
        }
        if let Some(expires_at) = self.expires_at {
            qr_code.expires_at = Some(expires_at);
        }
        if let Some(max_uses) = self.max_uses {
            qr_code.max_uses = Some(max_uses);
        }
        qr_code.updated_at = Utc::now();
    }
}

/// Feedback form submission from the QR landing page.
#[derive(Debug, Deserialize)]
pub struct FeedbackSubmission {
    /// The scanned code string, not a document id.
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
}

impl FeedbackSubmission {
    /// Builds the feedback document once the code has been resolved.
    pub fn into_feedback(self, venue_id: Uuid, qr_code_id: Uuid) -> QrFeedback {
        let mut feedback = QrFeedback::new(venue_id, qr_code_id, self.message)
            .with_visitor(self.name, self.email);
        if let Some(rating) = self.rating {
            feedback = feedback.with_rating(rating);
        }
        feedback
    }
}

/// Request payload for moderating a feedback entry.
#[derive(Debug, Deserialize)]
pub struct UpdateFeedbackStatus {
    pub status: FeedbackStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_code_is_generated() {
        let request = CreateQrCode {
            venue_id: Uuid::new_v4(),
            code: None,
            label: None,
            expires_at: None,
            max_uses: None,
        };

        let qr_code = request.into_qr_code();
        assert!(!qr_code.code.is_empty());
        assert!(qr_code.is_active);
    }

    #[test]
    fn blank_code_is_treated_as_missing() {
        let request = CreateQrCode {
            venue_id: Uuid::new_v4(),
            code: Some("   ".to_string()),
            label: Some("Mesa 3".to_string()),
            expires_at: None,
            max_uses: None,
        };

        assert_ne!(request.into_qr_code().code.trim(), "");
    }

    #[test]
    fn submission_builds_a_pending_feedback() {
        let submission: FeedbackSubmission = serde_json::from_value(serde_json::json!({
            "code": "CP-MESA-1",
            "message": "Muy rico todo",
            "rating": 5,
            "name": "Marta",
        }))
        .unwrap();

        let venue_id = Uuid::new_v4();
        let qr_id = Uuid::new_v4();
        let feedback = submission.into_feedback(venue_id, qr_id);

        assert_eq!(feedback.venue_id, venue_id);
        assert_eq!(feedback.qr_code_id, qr_id);
        assert_eq!(feedback.rating, Some(5));
        assert_eq!(feedback.visitor_name.as_deref(), Some("Marta"));
        assert_eq!(feedback.visitor_email, None);
        assert_eq!(feedback.status, FeedbackStatus::Pending);
    }

    #[test]
    fn blank_visitor_fields_become_none() {
        let submission: FeedbackSubmission = serde_json::from_value(serde_json::json!({
            "code": "CP-MESA-1",
            "message": "Sin queja ninguna",
            "name": "   ",
            "email": "",
        }))
        .unwrap();

        assert_eq!(submission.name, None);
        assert_eq!(submission.email, None);
    }
}
