//! Repository for the `purchases` table.
//!
//! The ledger is append-only: rows are inserted as `pending` and afterwards
//! only their status moves.

use glaze_core::purchase::{PurchaseStatus, STATUS_PENDING};
use glaze_core::types::DbId;
use sqlx::PgPool;

use crate::models::purchase::{CreatePurchase, PurchaseRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, set_id, status, amount_cents, created_at, updated_at";

/// Provides data access for purchase records.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Insert a new pending purchase.
    pub async fn create(pool: &PgPool, input: &CreatePurchase) -> Result<PurchaseRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO purchases (user_id, set_id, status, amount_cents) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PurchaseRecord>(&query)
            .bind(input.user_id)
            .bind(input.set_id)
            .bind(STATUS_PENDING)
            .bind(input.amount_cents)
            .fetch_one(pool)
            .await
    }

    /// Find a purchase by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PurchaseRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM purchases WHERE id = $1");
        sqlx::query_as::<_, PurchaseRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one user's purchases, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PurchaseRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PurchaseRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all purchases, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PurchaseRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM purchases ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, PurchaseRecord>(&query)
            .fetch_all(pool)
            .await
    }

    /// The user's open purchase of the set: one that is `pending` or
    /// `succeeded`. At most one exists (`uq_purchases_open`).
    pub async fn find_open(
        pool: &PgPool,
        user_id: DbId,
        set_id: DbId,
    ) -> Result<Option<PurchaseRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases \
             WHERE user_id = $1 AND set_id = $2 \
               AND status IN ('pending', 'succeeded')"
        );
        sqlx::query_as::<_, PurchaseRecord>(&query)
            .bind(user_id)
            .bind(set_id)
            .fetch_optional(pool)
            .await
    }

    /// Move a purchase from `from` to `to`.
    ///
    /// The `WHERE status = $2` guard makes the transition compare-and-set:
    /// returns `None` when the row does not exist or is no longer in `from`.
    /// Callers validate the transition itself before calling.
    pub async fn transition_status(
        pool: &PgPool,
        id: DbId,
        from: PurchaseStatus,
        to: PurchaseStatus,
    ) -> Result<Option<PurchaseRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE purchases SET status = $3 \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PurchaseRecord>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }
}
