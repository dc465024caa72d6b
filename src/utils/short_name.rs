//! Validation of caller-supplied link fields.

use crate::error::AppError;
use serde_json::json;

/// Names that collide with top-level routes and could never be redirected.
pub const RESERVED_NAMES: &[&str] = &["api", "ping", "health"];

/// Validates a short name for use as a redirect key.
///
/// # Rules
///
/// - Must not be empty or whitespace-only
/// - Must not contain `/` or whitespace (it is a single path segment)
/// - Cannot be a reserved route name
///
/// Case is preserved; `Promo` and `promo` are different names.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_short_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::bad_request(
            "short_name must not be empty",
            json!({ "field": "short_name" }),
        ));
    }

    if name.chars().any(|c| c == '/' || c.is_whitespace()) {
        return Err(AppError::bad_request(
            "short_name cannot contain slashes or whitespace",
            json!({ "short_name": name }),
        ));
    }

    if RESERVED_NAMES.contains(&name) {
        return Err(AppError::bad_request(
            "This short name is reserved",
            json!({ "short_name": name, "reserved": RESERVED_NAMES }),
        ));
    }

    Ok(())
}

/// Validates a destination URL.
///
/// The target is stored as given, but it must be non-empty and usable as a
/// `Location` header, so control characters are rejected.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the value is empty, whitespace-only
/// or contains a control character.
pub fn validate_original_url(url: &str) -> Result<(), AppError> {
    if url.trim().is_empty() {
        return Err(AppError::bad_request(
            "original_url must not be empty",
            json!({ "field": "original_url" }),
        ));
    }

    if url.chars().any(char::is_control) {
        return Err(AppError::bad_request(
            "original_url cannot contain control characters",
            json!({ "field": "original_url" }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_short_names() {
        assert!(validate_short_name("exmpl").is_ok());
        assert!(validate_short_name("test14").is_ok());
        assert!(validate_short_name("My-Link_2024").is_ok());
        assert!(validate_short_name("API").is_ok());
    }

    #[test]
    fn test_empty_short_name() {
        assert!(matches!(
            validate_short_name(""),
            Err(AppError::Validation { .. })
        ));
        assert!(validate_short_name("   ").is_err());
    }

    #[test]
    fn test_short_name_with_separator() {
        assert!(validate_short_name("a/b").is_err());
        assert!(validate_short_name("a b").is_err());
        assert!(validate_short_name("tab\there").is_err());
    }

    #[test]
    fn test_reserved_short_names() {
        for name in RESERVED_NAMES {
            assert!(validate_short_name(name).is_err(), "{name}");
        }
    }

    #[test]
    fn test_original_url() {
        assert!(validate_original_url("https://example.com").is_ok());
        assert!(validate_original_url("").is_err());
        assert!(validate_original_url(" \n").is_err());
    }

    #[test]
    fn test_original_url_with_control_characters() {
        assert!(matches!(
            validate_original_url("https://example.com/a\nb"),
            Err(AppError::Validation { .. })
        ));
        assert!(validate_original_url("https://example.com/\u{7f}").is_err());
        assert!(validate_original_url("https://bücher.example/straße").is_ok());
    }
}
