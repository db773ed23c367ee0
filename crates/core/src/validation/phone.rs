use std::sync::OnceLock;

use regex::Regex;

const PHONE_ERROR: &str = "Formato de teléfono no válido. Ej: 612 345 678 o +34 612 345 678";

/// Outcome of validating a phone field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneValidation {
    pub is_valid: bool,
    /// Canonical presentation of the number, when valid and non-empty.
    pub formatted: Option<String>,
    pub error: Option<String>,
}

impl PhoneValidation {
    fn valid(formatted: Option<String>) -> Self {
        Self {
            is_valid: true,
            formatted,
            error: None,
        }
    }

    fn invalid() -> Self {
        Self {
            is_valid: false,
            formatted: None,
            error: Some(PHONE_ERROR.to_string()),
        }
    }
}

/// Spanish mobile and landline numbers: nine digits starting with 6, 7,
/// 8 or 9, after formatting characters and the country prefix are gone.
fn spanish_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[6789]\d{8}$").expect("phone pattern is valid"))
}

/// Generic international numbers: `+`, a 1-3 digit country code (shortest
/// match wins), then 6-14 digits.
fn international_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+(\d{1,3}?)(\d{6,14})$").expect("phone pattern is valid"))
}

fn spanish_format(digits: &str) -> String {
    format!("{} {} {}", &digits[0..3], &digits[3..6], &digits[6..9])
}

/// Validates a phone number field from an admin form.
///
/// The field is optional: empty or whitespace-only input is accepted with
/// no formatted value. Recognized shapes, in order: Spanish national
/// (`612 345 678`), Spanish international (`+34 612 345 678`, `0034` also
/// accepted), generic international (`+CC` plus 6-14 digits).
pub fn validate_phone(input: &str) -> PhoneValidation {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return PhoneValidation::valid(None);
    }

    let compact: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    if spanish_regex().is_match(&compact) {
        return PhoneValidation::valid(Some(spanish_format(&compact)));
    }

    // A Spain prefix binds the rest to the national format
    let national = compact
        .strip_prefix("+34")
        .or_else(|| compact.strip_prefix("0034"));
    if let Some(digits) = national {
        if spanish_regex().is_match(digits) {
            return PhoneValidation::valid(Some(format!("+34 {}", spanish_format(digits))));
        }
        return PhoneValidation::invalid();
    }

    if let Some(captures) = international_regex().captures(&compact) {
        return PhoneValidation::valid(Some(format!("+{} {}", &captures[1], &captures[2])));
    }

    PhoneValidation::invalid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_nine_digits() {
        let result = validate_phone("612345678");
        assert!(result.is_valid);
        assert_eq!(result.formatted.as_deref(), Some("612 345 678"));
    }

    #[test]
    fn test_spaced_format() {
        let result = validate_phone("612 345 678");
        assert!(result.is_valid);
        assert_eq!(result.formatted.as_deref(), Some("612 345 678"));
    }

    #[test]
    fn test_country_prefix() {
        let result = validate_phone("+34 612 345 678");
        assert!(result.is_valid);
        assert_eq!(result.formatted.as_deref(), Some("+34 612 345 678"));

        let result = validate_phone("0034612345678");
        assert!(result.is_valid);
        assert_eq!(result.formatted.as_deref(), Some("+34 612 345 678"));
    }

    #[test]
    fn test_landline_prefixes() {
        assert!(validate_phone("912 345 678").is_valid);
        assert!(validate_phone("812345678").is_valid);
        assert!(validate_phone("712345678").is_valid);
    }

    #[test]
    fn test_dashes_dots_and_parens() {
        assert!(validate_phone("612-345-678").is_valid);
        assert!(validate_phone("612.345.678").is_valid);
        assert!(validate_phone("(612) 345 678").is_valid);
    }

    #[test]
    fn test_generic_international() {
        let result = validate_phone("+1 415 555 2671");
        assert!(result.is_valid);
        assert_eq!(result.formatted.as_deref(), Some("+1 4155552671"));
    }

    #[test]
    fn test_empty_is_accepted() {
        let result = validate_phone("");
        assert!(result.is_valid);
        assert!(result.formatted.is_none());
        assert!(result.error.is_none());

        assert!(validate_phone("   ").is_valid);
    }

    #[test]
    fn test_too_short() {
        assert!(!validate_phone("12345").is_valid);
    }

    #[test]
    fn test_too_long_for_spain() {
        assert!(!validate_phone("6123456789").is_valid);
    }

    #[test]
    fn test_bad_leading_digit() {
        assert!(!validate_phone("512345678").is_valid);
    }

    #[test]
    fn test_spain_prefix_with_bad_number() {
        assert!(!validate_phone("+34 512 345 678").is_valid);
        assert!(!validate_phone("+34 6123").is_valid);
    }

    #[test]
    fn test_letters_rejected() {
        assert!(!validate_phone("612 345 abc").is_valid);
    }

    #[test]
    fn test_error_message() {
        let result = validate_phone("12345");
        assert_eq!(
            result.error.as_deref(),
            Some("Formato de teléfono no válido. Ej: 612 345 678 o +34 612 345 678")
        );
    }
}
