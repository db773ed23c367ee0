use url::Url;

const URL_SCHEME_ERROR: &str = "La URL debe comenzar con http:// o https://";
const URL_INVALID_ERROR: &str = "La URL no es válida";

/// Whether a website field holds an acceptable URL.
///
/// The field is optional: empty or whitespace-only input is accepted.
/// Anything else must be an absolute http(s) URL with a host.
pub fn is_valid_url(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return true;
    }

    match Url::parse(trimmed) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Spanish error message for an unacceptable URL, `None` when valid.
///
/// Inputs that look like a bare domain (they contain a dot but no http
/// scheme) get the more helpful "must start with http(s)" message.
pub fn url_error_message(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if is_valid_url(trimmed) {
        return None;
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") && trimmed.contains('.')
    {
        Some(URL_SCHEME_ERROR.to_string())
    } else {
        Some(URL_INVALID_ERROR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url() {
        assert!(is_valid_url("https://example.com"));
        assert!(url_error_message("https://example.com").is_none());
    }

    #[test]
    fn test_http_url() {
        assert!(is_valid_url("http://example.com/carta"));
    }

    #[test]
    fn test_url_with_path_and_query() {
        assert!(is_valid_url("https://example.com/menu?lang=es"));
    }

    #[test]
    fn test_empty_is_accepted() {
        assert!(is_valid_url(""));
        assert!(is_valid_url("  "));
        assert!(url_error_message("").is_none());
    }

    #[test]
    fn test_missing_scheme() {
        assert!(!is_valid_url("example.com"));
        assert_eq!(
            url_error_message("example.com").as_deref(),
            Some("La URL debe comenzar con http:// o https://")
        );
        assert_eq!(
            url_error_message("www.example.com").as_deref(),
            Some("La URL debe comenzar con http:// o https://")
        );
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(!is_valid_url("ftp://example.com"));
        assert_eq!(
            url_error_message("ftp://example.com").as_deref(),
            Some("La URL debe comenzar con http:// o https://")
        );
    }

    #[test]
    fn test_scheme_without_host() {
        assert!(!is_valid_url("https://"));
        assert_eq!(
            url_error_message("https://").as_deref(),
            Some("La URL no es válida")
        );
    }

    #[test]
    fn test_malformed_url() {
        assert!(!is_valid_url("https://exa mple.com"));
        assert_eq!(
            url_error_message("https://exa mple.com").as_deref(),
            Some("La URL no es válida")
        );
    }

    #[test]
    fn test_gibberish_without_dot() {
        assert_eq!(
            url_error_message("carta del local").as_deref(),
            Some("La URL no es válida")
        );
    }
}
