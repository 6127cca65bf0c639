//! Validation rules for catalog entities: categories, overlay sets and
//! overlay assets.
//!
//! The database enforces the same pricing rule with a CHECK constraint;
//! these helpers exist so the API can reject bad input with a useful message
//! before a round-trip.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::overlay::{validate_value, OverlayKind};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a category name or set title.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum length of a slug.
pub const MAX_SLUG_LENGTH: usize = 80;

/// Upper bound on a set's price (USD 10,000.00).
pub const MAX_PRICE_CENTS: i32 = 1_000_000;

/// Key used in the public catalog for sets without a category.
pub const UNCATEGORIZED_KEY: &str = "uncategorized";

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate a lowercase, hyphen-separated slug.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug exceeds maximum length of {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Validate a display name (category name, set title).
pub fn validate_name(field: &str, name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a display-order index.
pub fn validate_order_index(order_index: i32) -> Result<(), CoreError> {
    if order_index < 0 {
        return Err(CoreError::Validation(format!(
            "order_index must be non-negative, got {order_index}"
        )));
    }
    Ok(())
}

/// Validate the pricing pair of an overlay set.
///
/// A paid set must carry a positive price; a free set must not carry one.
pub fn validate_pricing(is_paid: bool, price_cents: Option<i32>) -> Result<(), CoreError> {
    match (is_paid, price_cents) {
        (true, Some(cents)) if cents > 0 && cents <= MAX_PRICE_CENTS => Ok(()),
        (true, Some(cents)) => Err(CoreError::Validation(format!(
            "Paid set price must be between 1 and {MAX_PRICE_CENTS} cents, got {cents}"
        ))),
        (true, None) => Err(CoreError::Validation(
            "Paid set requires price_cents".into(),
        )),
        (false, Some(_)) => Err(CoreError::Validation(
            "Free set must not have price_cents".into(),
        )),
        (false, None) => Ok(()),
    }
}

/// Validate an asset's aspect ratio, when present.
pub fn validate_aspect_ratio(aspect_ratio: Option<f64>) -> Result<(), CoreError> {
    match aspect_ratio {
        Some(ratio) if !ratio.is_finite() || ratio <= 0.0 => Err(CoreError::Validation(format!(
            "aspect_ratio must be a positive number, got {ratio}"
        ))),
        _ => Ok(()),
    }
}

/// Validate an asset's kind and value together.
pub fn validate_asset(kind: &str, value: &str, aspect_ratio: Option<f64>) -> Result<(), CoreError> {
    let kind = OverlayKind::from_name(kind)?;
    validate_value(kind, value)?;
    validate_aspect_ratio(aspect_ratio)
}

/// Validate a requested asset order against the set's current assets.
///
/// `requested` must list every id in `existing` exactly once.
pub fn validate_reorder(existing: &[DbId], requested: &[DbId]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !seen.insert(*id) {
            return Err(CoreError::Validation(format!(
                "Asset id {id} appears more than once in the requested order"
            )));
        }
    }

    let existing: HashSet<DbId> = existing.iter().copied().collect();
    if seen != existing {
        return Err(CoreError::Validation(
            "Requested order must contain exactly the set's active asset ids".into(),
        ));
    }
    Ok(())
}
