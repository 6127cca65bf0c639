//! Overlay set models and DTOs.
//!
//! An overlay set is a free or paid bundle of overlay assets, optionally
//! filed under a catalog category.

use glaze_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::overlay_asset::OverlayAsset;

/// A row from the `overlay_sets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySetSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub cover_image_url: Option<String>,
    pub is_paid: bool,
    /// Only present when `is_paid` is true.
    pub price_cents: Option<i32>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An overlay set enriched with its assets in display order.
#[derive(Debug, Clone, Serialize)]
pub struct OverlaySetWithAssets {
    #[serde(flatten)]
    pub set: OverlaySetSummary,
    pub assets: Vec<OverlayAsset>,
}

/// DTO for creating an overlay set.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOverlaySet {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(length(min = 1, max = 80))]
    pub slug: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
    pub price_cents: Option<i32>,
}

/// DTO for updating an overlay set. Slug is immutable.
///
/// Pricing moves as a unit: when either `is_paid` or `price_cents` is sent,
/// the stored price is replaced by `price_cents` (absent meaning none).
///
/// `description`, `category_id` and `cover_image_url` are clearable: an
/// explicit `null` removes the value, an absent key keeps it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOverlaySet {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub category_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub cover_image_url: Option<Option<String>>,
    pub is_paid: Option<bool>,
    pub price_cents: Option<i32>,
    pub is_active: Option<bool>,
}

impl UpdateOverlaySet {
    pub fn touches_pricing(&self) -> bool {
        self.is_paid.is_some() || self.price_cents.is_some()
    }
}
