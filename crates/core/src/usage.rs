//! Usage telemetry event validation.
//!
//! Usage stats are append-only. The `meta` payload is free-form but must be
//! a JSON object of bounded size.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length of an event name.
pub const MAX_EVENT_LENGTH: usize = 64;

/// Maximum serialized size of the `meta` object (8 KiB).
pub const MAX_META_BYTES: usize = 8 * 1024;

/// Event recorded when an overlay set is applied in the editor.
pub const EVENT_SET_APPLIED: &str = "set.applied";

/// Event recorded when a composited photo is exported.
pub const EVENT_PHOTO_EXPORTED: &str = "photo.exported";

static EVENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*(?:\.[a-z0-9_]+)*$").expect("valid event regex"));

/// Validate a dotted, lowercase event name such as `set.applied`.
pub fn validate_event(event: &str) -> Result<(), CoreError> {
    if event.is_empty() || event.len() > MAX_EVENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Event name must be 1-{MAX_EVENT_LENGTH} characters"
        )));
    }
    if !EVENT_RE.is_match(event) {
        return Err(CoreError::Validation(format!(
            "Invalid event name '{event}'. Use lowercase dotted segments, e.g. '{EVENT_SET_APPLIED}'"
        )));
    }
    Ok(())
}

/// Validate the `meta` payload.
pub fn validate_meta(meta: &serde_json::Value) -> Result<(), CoreError> {
    if !meta.is_object() {
        return Err(CoreError::Validation("meta must be a JSON object".into()));
    }
    let size = meta.to_string().len();
    if size > MAX_META_BYTES {
        return Err(CoreError::Validation(format!(
            "meta exceeds maximum size of {MAX_META_BYTES} bytes (got {size})"
        )));
    }
    Ok(())
}
