//! Usage telemetry model and DTOs.

use glaze_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `usage_stats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStat {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub set_id: Option<DbId>,
    pub event: String,
    pub meta: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending a usage event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsageStat {
    /// Filled in by the server from the session; ignored on input.
    #[serde(skip)]
    pub user_id: Option<DbId>,
    pub set_id: Option<DbId>,
    pub event: String,
    #[serde(default = "empty_meta")]
    pub meta: serde_json::Value,
}

fn empty_meta() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
