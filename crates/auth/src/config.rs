use std::time::Duration;

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_ttl: Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
    /// Emails granted the ADMIN role when their account is provisioned.
    pub admin_emails: Vec<String>,
    /// Shared secret required by the user-provisioning endpoint.
    pub admin_api_secret: Option<String>,
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SESSION_TTL_HOURS`: Session TTL in hours (default: 12)
    /// - `COOKIE_SECURE`: Whether to set secure flag on cookies (default: true)
    /// - `ADMIN_EMAILS`: Comma-separated emails that get the ADMIN role on signup
    /// - `ADMIN_API_SECRET`: Shared secret for the provisioning endpoint (optional)
    pub fn from_env() -> Self {
        let session_ttl = std::env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|hours| Duration::from_secs(hours * 60 * 60))
            .unwrap_or(Duration::from_secs(12 * 60 * 60)); // 12 hours default

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        let admin_emails = std::env::var("ADMIN_EMAILS")
            .map(|v| {
                v.split(',')
                    .map(|email| email.trim().to_lowercase())
                    .filter(|email| !email.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let admin_api_secret = std::env::var("ADMIN_API_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty());

        Self {
            session_ttl,
            cookie_name: "tapeo_session".to_string(),
            cookie_secure,
            admin_emails,
            admin_api_secret,
        }
    }

    /// Whether an email is on the admin allowlist. Comparison is
    /// case-insensitive.
    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|allowed| allowed == &email)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(12 * 60 * 60),
            cookie_name: "tapeo_session".to_string(),
            cookie_secure: false,
            admin_emails: Vec::new(),
            admin_api_secret: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_email_check_is_case_insensitive() {
        let config = AuthConfig {
            admin_emails: vec!["ana@tapeo.es".to_string()],
            ..AuthConfig::default()
        };

        assert!(config.is_admin_email("ana@tapeo.es"));
        assert!(config.is_admin_email("  ANA@Tapeo.es "));
        assert!(!config.is_admin_email("otro@tapeo.es"));
    }

    #[test]
    fn default_ttl_is_twelve_hours() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl, Duration::from_secs(12 * 60 * 60));
    }
}
