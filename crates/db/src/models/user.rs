//! User account model.
//!
//! Accounts are created on first authenticated request, keyed by the
//! identity provider's subject. The role mirrors the provider's grant.

use glaze_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: DbId,
    pub external_id: String,
    pub email: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or refreshing a user from identity-provider claims.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertUser {
    pub external_id: String,
    pub email: Option<String>,
    pub role: String,
}
