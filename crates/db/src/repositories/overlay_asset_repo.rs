//! Repository for the `overlay_assets` table.

use glaze_core::types::DbId;
use sqlx::PgPool;

use crate::models::overlay_asset::{CreateOverlayAsset, OverlayAsset, UpdateOverlayAsset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, set_id, kind, value, aspect_ratio, order_index, is_active, \
    created_at, updated_at";

/// Provides CRUD and ordering operations for overlay assets.
pub struct OverlayAssetRepo;

impl OverlayAssetRepo {
    /// Insert a new asset into `set_id`.
    ///
    /// Without an explicit `order_index` the asset goes after the set's last
    /// active asset.
    pub async fn create(
        pool: &PgPool,
        set_id: DbId,
        input: &CreateOverlayAsset,
    ) -> Result<OverlayAsset, sqlx::Error> {
        let query = format!(
            "INSERT INTO overlay_assets (set_id, kind, value, aspect_ratio, order_index) \
             VALUES ($1, $2, $3, $4, COALESCE($5, \
                 (SELECT COALESCE(MAX(order_index) + 1, 0) FROM overlay_assets \
                  WHERE set_id = $1 AND is_active = true))) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OverlayAsset>(&query)
            .bind(set_id)
            .bind(&input.kind)
            .bind(&input.value)
            .bind(input.aspect_ratio)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OverlayAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM overlay_assets WHERE id = $1");
        sqlx::query_as::<_, OverlayAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the assets of one set in display order.
    pub async fn list_for_set(
        pool: &PgPool,
        set_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<OverlayAsset>, sqlx::Error> {
        let query = if include_inactive {
            format!(
                "SELECT {COLUMNS} FROM overlay_assets \
                 WHERE set_id = $1 \
                 ORDER BY order_index, id"
            )
        } else {
            format!(
                "SELECT {COLUMNS} FROM overlay_assets \
                 WHERE set_id = $1 AND is_active = true \
                 ORDER BY order_index, id"
            )
        };
        sqlx::query_as::<_, OverlayAsset>(&query)
            .bind(set_id)
            .fetch_all(pool)
            .await
    }

    /// List active assets for many sets at once, grouped by set and in
    /// display order within each set.
    pub async fn list_active_for_sets(
        pool: &PgPool,
        set_ids: &[DbId],
    ) -> Result<Vec<OverlayAsset>, sqlx::Error> {
        if set_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM overlay_assets \
             WHERE set_id = ANY($1) AND is_active = true \
             ORDER BY set_id, order_index, id"
        );
        sqlx::query_as::<_, OverlayAsset>(&query)
            .bind(set_ids)
            .fetch_all(pool)
            .await
    }

    /// IDs of the set's active assets in display order.
    pub async fn active_ids_for_set(pool: &PgPool, set_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM overlay_assets \
             WHERE set_id = $1 AND is_active = true \
             ORDER BY order_index, id",
        )
        .bind(set_id)
        .fetch_all(pool)
        .await
    }

    /// Update an asset. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOverlayAsset,
    ) -> Result<Option<OverlayAsset>, sqlx::Error> {
        let query = format!(
            "UPDATE overlay_assets SET \
                value = COALESCE($2, value), \
                aspect_ratio = COALESCE($3, aspect_ratio), \
                order_index = COALESCE($4, order_index), \
                is_active = COALESCE($5, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OverlayAsset>(&query)
            .bind(id)
            .bind(&input.value)
            .bind(input.aspect_ratio)
            .bind(input.order_index)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an asset (set is_active = false).
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE overlay_assets SET is_active = false \
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Rewrite `order_index` for the given assets of `set_id` to their
    /// position in `asset_ids`, in one transaction.
    pub async fn reorder(
        pool: &PgPool,
        set_id: DbId,
        asset_ids: &[DbId],
    ) -> Result<Vec<OverlayAsset>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (position, asset_id) in asset_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE overlay_assets SET order_index = $3 \
                 WHERE id = $1 AND set_id = $2",
            )
            .bind(asset_id)
            .bind(set_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Self::list_for_set(pool, set_id, false).await
    }
}
