//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

use crate::error::{AppError, AppResult};

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color pattern"));

/// Report every absent field at once.
///
/// Each entry pairs a field name with whether it was provided.
pub fn require_fields(fields: &[(&str, bool)]) -> AppResult<()> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingFields(missing))
    }
}

/// Trimmed value, `None` when absent or blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Validate a `#rgb` / `#rrggbb` color
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR.is_match(color) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color"))
    }
}
