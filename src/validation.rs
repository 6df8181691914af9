//! Input validation.
//!
//! Pure checks run before any store access: identifier parsing and
//! non-blank text requirements. These never touch state; callers translate
//! the returned `ApiError` into a 400 response.

use uuid::Uuid;

use crate::error::ApiError;

/// Parse a candidate entity identifier.
///
/// `what` names the entity for the error message ("video", "tweet", "user").
/// Fails with `InvalidIdentifier` if the token is not a structurally valid
/// UUID.
pub fn parse_id(what: &'static str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::invalid_id(what))
}

/// Require a free-text field to be present and non-blank after trimming.
///
/// Returns the trimmed text, or `MissingField` if the value is absent or
/// whitespace-only.
pub fn require_text(field: &'static str, value: Option<&str>) -> Result<String, ApiError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(ApiError::missing(field)),
    }
}
