//! Shared query parameter types for API handlers.

use serde::Deserialize;

use crate::error::AppError;

/// `?include_inactive=` flag for admin listings of soft-deletable entities.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Interpret a `0`/`1` style query flag.
///
/// Absent and empty values are `false`. `1`/`true` are `true`, `0`/`false`
/// are `false`; anything else is rejected.
pub fn parse_flag(name: &str, value: Option<&str>) -> Result<bool, AppError> {
    match value.map(str::trim) {
        None | Some("") | Some("0") | Some("false") => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some(other) => Err(AppError::BadRequest(format!(
            "Invalid value '{other}' for '{name}'. Expected 0, 1, true or false"
        ))),
    }
}
