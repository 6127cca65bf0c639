//! Overlay asset model and DTOs.
//!
//! Assets belong to exactly one overlay set. Removal is a soft delete
//! through `is_active`.

use glaze_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `overlay_assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayAsset {
    pub id: DbId,
    pub set_id: DbId,
    /// `css` or `image`.
    pub kind: String,
    pub value: String,
    pub aspect_ratio: Option<f64>,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding an asset to a set. Without `order_index` the asset is
/// appended after the set's last asset.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOverlayAsset {
    pub kind: String,
    #[validate(length(min = 1, max = 4096))]
    pub value: String,
    pub aspect_ratio: Option<f64>,
    #[validate(range(min = 0))]
    pub order_index: Option<i32>,
}

/// DTO for updating an asset. Kind is immutable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOverlayAsset {
    #[validate(length(min = 1, max = 4096))]
    pub value: Option<String>,
    pub aspect_ratio: Option<f64>,
    #[validate(range(min = 0))]
    pub order_index: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for reordering a set's active assets.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderAssets {
    /// Every active asset id of the set, in the new display order.
    pub asset_ids: Vec<DbId>,
}
