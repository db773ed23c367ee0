//! Deserializers tolerant of browser form payloads.
//!
//! HTML inputs submit `""` when left blank, and scripts that forward
//! form data wholesale pass those empty strings through. The helpers
//! here map blank values to `None` instead of failing or storing
//! whitespace.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Optional string where blank or whitespace-only input means absent.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Optional `YYYY-MM-DD` date where blank input means absent.
///
/// A non-blank value that is not a valid date is still an error.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Optional u32 where blank input means absent.
///
/// Number inputs arrive as `""`, a numeric string, or a bare number
/// depending on how the form was serialized; all three are accepted.
pub fn deserialize_optional_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    let value: Option<NumberOrString> = Option::deserialize(deserializer)?;
    match value {
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if !s.trim().is_empty() => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct FormPayload {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        label: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        visit_date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "deserialize_optional_u32")]
        max_uses: Option<u32>,
    }

    fn parse(json: &str) -> FormPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_blank_strings_become_none() {
        assert_eq!(parse(r#"{"label": ""}"#).label, None);
        assert_eq!(parse(r#"{"label": "  \t "}"#).label, None);
        assert_eq!(parse(r#"{}"#).label, None);
    }

    #[test]
    fn test_nonblank_string_survives() {
        assert_eq!(parse(r#"{"label": "Mesa 3"}"#).label.as_deref(), Some("Mesa 3"));
    }

    #[test]
    fn test_date_parses_or_is_absent() {
        assert_eq!(
            parse(r#"{"visit_date": "2026-03-14"}"#).visit_date,
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
        assert_eq!(parse(r#"{"visit_date": ""}"#).visit_date, None);
        assert_eq!(parse(r#"{"visit_date": " 2026-03-14 "}"#).visit_date, NaiveDate::from_ymd_opt(2026, 3, 14));
    }

    #[test]
    fn test_garbage_date_is_an_error() {
        let result: Result<FormPayload, _> = serde_json::from_str(r#"{"visit_date": "marzo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_number_accepts_bare_and_string_forms() {
        assert_eq!(parse(r#"{"max_uses": 200}"#).max_uses, Some(200));
        assert_eq!(parse(r#"{"max_uses": "200"}"#).max_uses, Some(200));
        assert_eq!(parse(r#"{"max_uses": ""}"#).max_uses, None);
    }

    #[test]
    fn test_garbage_number_is_an_error() {
        let result: Result<FormPayload, _> = serde_json::from_str(r#"{"max_uses": "muchos"}"#);
        assert!(result.is_err());
    }
}
