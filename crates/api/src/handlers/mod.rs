pub mod auth;
pub mod gig;
pub mod set;
pub mod set_item;
pub mod track;

use setlist_core::error::CoreError;

/// Trim a required text field, rejecting blank values.
pub(crate) fn require_text(value: &str, field: &'static str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, mapping blank values to `None`.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim a tri-state PATCH text field, keeping the absent/clear/replace
/// distinction. A supplied blank value clears like an explicit `null`.
pub(crate) fn normalize_patch(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(normalize_optional)
}
