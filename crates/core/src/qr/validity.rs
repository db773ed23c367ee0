use chrono::{DateTime, Utc};
use serde::Serialize;

use super::QrCode;

/// Rejection reasons shown verbatim on the scan landing page.
pub const REASON_INACTIVE: &str = "Código QR inactivo";
pub const REASON_EXPIRED: &str = "Código QR expirado";
pub const REASON_EXHAUSTED: &str = "Límite de usos alcanzado";

/// Outcome of checking a QR code at scan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QrValidity {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl QrValidity {
    fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    fn rejected(reason: &'static str) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }
}

/// Decides whether a scanned code may be used at `now`.
///
/// Checks run in order: active flag, expiry, usage limit. The first
/// failing check supplies the reason. A code expires strictly after
/// `expires_at` passes.
pub fn evaluate_qr_code(code: &QrCode, now: DateTime<Utc>) -> QrValidity {
    if !code.is_active {
        return QrValidity::rejected(REASON_INACTIVE);
    }
    if let Some(expires_at) = code.expires_at {
        if expires_at < now {
            return QrValidity::rejected(REASON_EXPIRED);
        }
    }
    if !code.has_uses_remaining() {
        return QrValidity::rejected(REASON_EXHAUSTED);
    }
    QrValidity::ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn code() -> QrCode {
        QrCode::new(Uuid::new_v4(), "K9ZR1T3M4A2B")
    }

    #[test]
    fn test_active_unrestricted_code_is_valid() {
        let result = evaluate_qr_code(&code(), Utc::now());
        assert!(result.valid);
        assert_eq!(result.reason, None);
    }

    #[test]
    fn test_inactive_code_is_rejected() {
        let result = evaluate_qr_code(&code().with_active(false), Utc::now());
        assert!(!result.valid);
        assert_eq!(result.reason, Some("Código QR inactivo"));
    }

    #[test]
    fn test_expired_code_is_rejected() {
        let now = Utc::now();
        let expired = code().with_expires_at(now - Duration::hours(1));
        let result = evaluate_qr_code(&expired, now);
        assert!(!result.valid);
        assert_eq!(result.reason, Some("Código QR expirado"));
    }

    #[test]
    fn test_expiry_boundary_is_still_valid() {
        let now = Utc::now();
        let result = evaluate_qr_code(&code().with_expires_at(now), now);
        assert!(result.valid);
    }

    #[test]
    fn test_exhausted_code_is_rejected() {
        let exhausted = code().with_max_uses(10).with_uses(10);
        let result = evaluate_qr_code(&exhausted, Utc::now());
        assert!(!result.valid);
        assert_eq!(result.reason, Some("Límite de usos alcanzado"));
    }

    #[test]
    fn test_uses_below_limit_is_valid() {
        let result = evaluate_qr_code(&code().with_max_uses(10).with_uses(9), Utc::now());
        assert!(result.valid);
    }

    #[test]
    fn test_inactive_wins_over_expiry() {
        let now = Utc::now();
        let both = code()
            .with_active(false)
            .with_expires_at(now - Duration::hours(1));
        assert_eq!(evaluate_qr_code(&both, now).reason, Some(REASON_INACTIVE));
    }

    #[test]
    fn test_expiry_wins_over_usage() {
        let now = Utc::now();
        let both = code()
            .with_expires_at(now - Duration::hours(1))
            .with_max_uses(1)
            .with_uses(1);
        assert_eq!(evaluate_qr_code(&both, now).reason, Some(REASON_EXPIRED));
    }

    #[test]
    fn test_future_expiry_is_valid() {
        let now = Utc::now();
        let result = evaluate_qr_code(&code().with_expires_at(now + Duration::days(30)), now);
        assert!(result.valid);
    }
}
