/// Validates a post-login redirect target to prevent open redirects.
///
/// Returns `Some(url)` if the URL is a valid relative path, `None` otherwise.
///
/// # Security
///
/// This function prevents open redirect attacks by ensuring URLs:
/// - Start with a single `/` (relative path)
/// - Do not start with `//` (protocol-relative URLs like `//evil.com`)
/// - Do not contain control characters (potential injection)
/// - Do not contain `://` (absolute URLs with schemes like `https://`, `javascript:`)
///
/// # Examples
///
/// ```
/// use tapeo_core::auth::validate_return_to;
///
/// // Valid relative paths
/// assert_eq!(validate_return_to("/admin/venues"), Some("/admin/venues"));
/// assert_eq!(validate_return_to("/"), Some("/"));
///
/// // Invalid: protocol-relative URL
/// assert_eq!(validate_return_to("//evil.com"), None);
///
/// // Invalid: absolute URL
/// assert_eq!(validate_return_to("https://evil.com"), None);
/// ```
pub fn validate_return_to(url: &str) -> Option<&str> {
    // Must start with /
    if !url.starts_with('/') {
        return None;
    }

    // Reject protocol-relative URLs (//evil.com)
    if url.starts_with("//") {
        return None;
    }

    // Reject control characters (potential injection attacks)
    if url.chars().any(|c| c.is_control()) {
        return None;
    }

    // Reject URLs with schemes (https://, javascript:, etc.)
    if url.contains("://") {
        return None;
    }

    Some(url)
}

/// Minimal shape check for an email address: one `@` with non-empty
/// local part and a domain containing a dot.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(' ')
}

/// Minimum length accepted for new passwords.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn is_acceptable_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== validate_return_to tests ====================

    #[test]
    fn return_to_accepts_simple_relative_path() {
        assert_eq!(validate_return_to("/admin/venues"), Some("/admin/venues"));
    }

    #[test]
    fn accepts_root_path() {
        assert_eq!(validate_return_to("/"), Some("/"));
    }

    #[test]
    fn accepts_path_with_query_string() {
        assert_eq!(validate_return_to("/buscar?q=tapas"), Some("/buscar?q=tapas"));
    }

    #[test]
    fn accepts_path_with_fragment() {
        assert_eq!(validate_return_to("/page#section"), Some("/page#section"));
    }

    #[test]
    fn accepts_path_with_encoded_characters() {
        assert_eq!(
            validate_return_to("/path%20with%20spaces"),
            Some("/path%20with%20spaces")
        );
    }

    #[test]
    fn rejects_https_url() {
        assert_eq!(validate_return_to("https://evil.com"), None);
    }

    #[test]
    fn rejects_http_url() {
        assert_eq!(validate_return_to("http://evil.com/path"), None);
    }

    #[test]
    fn rejects_url_without_leading_slash() {
        assert_eq!(validate_return_to("admin/venues"), None);
    }

    #[test]
    fn rejects_empty_string() {
        assert_eq!(validate_return_to(""), None);
    }

    #[test]
    fn rejects_protocol_relative_url() {
        assert_eq!(validate_return_to("//evil.com"), None);
        assert_eq!(validate_return_to("//user:pass@evil.com"), None);
    }

    #[test]
    fn rejects_javascript_url() {
        assert_eq!(validate_return_to("javascript:alert(1)"), None);
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(validate_return_to("/path\n/evil"), None);
        assert_eq!(validate_return_to("/path\r/evil"), None);
        assert_eq!(validate_return_to("/path\0/evil"), None);
    }

    #[test]
    fn rejects_scheme_embedded_in_path() {
        assert_eq!(validate_return_to("/redirect?url=https://evil.com"), None);
    }

    #[test]
    fn accepts_colon_without_double_slash() {
        assert_eq!(
            validate_return_to("/proxy?host=localhost:8080"),
            Some("/proxy?host=localhost:8080")
        );
    }

    // ==================== email and password tests ====================

    #[test]
    fn email_accepts_normal_addresses() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("ana.garcia+tapeo@sub.example.org"));
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("ana@nodomain"));
        assert!(!is_valid_email("ana@.com"));
        assert!(!is_valid_email("ana garcia@example.com"));
    }

    #[test]
    fn password_length_check() {
        assert!(is_acceptable_password("12345678"));
        assert!(is_acceptable_password("contraseña"));
        assert!(!is_acceptable_password("1234567"));
        assert!(!is_acceptable_password(""));
    }
}
