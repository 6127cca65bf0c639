//! Purchase ledger model and DTOs.

use glaze_core::purchase::PurchaseStatus;
use glaze_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `purchases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub set_id: DbId,
    /// One of `pending`, `succeeded`, `failed`, `refunded`.
    pub status: String,
    pub amount_cents: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a pending purchase.
#[derive(Debug, Clone)]
pub struct CreatePurchase {
    pub user_id: DbId,
    pub set_id: DbId,
    pub amount_cents: i32,
}

/// Request body for `POST /api/purchases`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub set_id: DbId,
}

/// Request body for `PUT /api/admin/purchases/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePurchaseStatus {
    pub status: PurchaseStatus,
}
