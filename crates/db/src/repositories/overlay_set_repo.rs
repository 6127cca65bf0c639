//! Repository for the `overlay_sets` table.

use std::collections::HashMap;

use glaze_core::types::DbId;
use sqlx::PgPool;

use crate::models::overlay_asset::OverlayAsset;
use crate::models::overlay_set::{
    CreateOverlaySet, OverlaySetSummary, OverlaySetWithAssets, UpdateOverlaySet,
};
use crate::repositories::OverlayAssetRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, category_id, cover_image_url, \
    is_paid, price_cents, is_active, created_at, updated_at";

/// Provides CRUD operations for overlay sets.
pub struct OverlaySetRepo;

impl OverlaySetRepo {
    /// Insert a new overlay set, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOverlaySet,
    ) -> Result<OverlaySetSummary, sqlx::Error> {
        let query = format!(
            "INSERT INTO overlay_sets \
                (title, slug, description, category_id, cover_image_url, is_paid, price_cents) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OverlaySetSummary>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.cover_image_url)
            .bind(input.is_paid)
            .bind(input.price_cents)
            .fetch_one(pool)
            .await
    }

    /// Find an overlay set by its internal ID, active or not.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OverlaySetSummary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM overlay_sets WHERE id = $1");
        sqlx::query_as::<_, OverlaySetSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an overlay set enriched with its assets.
    ///
    /// With `include_inactive = false` an inactive set is reported as
    /// missing and only active assets are attached.
    pub async fn find_with_assets(
        pool: &PgPool,
        id: DbId,
        include_inactive: bool,
    ) -> Result<Option<OverlaySetWithAssets>, sqlx::Error> {
        let set = match Self::find_by_id(pool, id).await? {
            Some(set) if include_inactive || set.is_active => set,
            _ => return Ok(None),
        };
        let assets = OverlayAssetRepo::list_for_set(pool, set.id, include_inactive).await?;
        Ok(Some(OverlaySetWithAssets { set, assets }))
    }

    /// List overlay sets, optionally including inactive ones.
    ///
    /// Ordered by title, then id.
    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<OverlaySetSummary>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM overlay_sets ORDER BY title, id")
        } else {
            format!(
                "SELECT {COLUMNS} FROM overlay_sets \
                 WHERE is_active = true \
                 ORDER BY title, id"
            )
        };
        sqlx::query_as::<_, OverlaySetSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// List all active sets with their active assets.
    ///
    /// Assets are loaded with a single `ANY($1)` query and grouped in memory.
    pub async fn list_active_with_assets(
        pool: &PgPool,
    ) -> Result<Vec<OverlaySetWithAssets>, sqlx::Error> {
        let sets = Self::list(pool, false).await?;
        let set_ids: Vec<DbId> = sets.iter().map(|s| s.id).collect();
        let assets = OverlayAssetRepo::list_active_for_sets(pool, &set_ids).await?;

        let mut by_set: HashMap<DbId, Vec<OverlayAsset>> = HashMap::new();
        for asset in assets {
            by_set.entry(asset.set_id).or_default().push(asset);
        }

        Ok(sets
            .into_iter()
            .map(|set| {
                let assets = by_set.remove(&set.id).unwrap_or_default();
                OverlaySetWithAssets { set, assets }
            })
            .collect())
    }

    /// Update an overlay set. Only non-`None` fields are applied.
    ///
    /// When the DTO touches pricing, `price_cents` is replaced as sent
    /// (including with `NULL`). The clearable fields are written whenever
    /// their outer `Option` is `Some`, so `Some(None)` stores `NULL`.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOverlaySet,
    ) -> Result<Option<OverlaySetSummary>, sqlx::Error> {
        let query = format!(
            "UPDATE overlay_sets SET \
                title = COALESCE($2, title), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                category_id = CASE WHEN $5 THEN $6 ELSE category_id END, \
                cover_image_url = CASE WHEN $7 THEN $8 ELSE cover_image_url END, \
                is_paid = COALESCE($9, is_paid), \
                price_cents = CASE WHEN $11 THEN $10 ELSE price_cents END, \
                is_active = COALESCE($12, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OverlaySetSummary>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(input.cover_image_url.is_some())
            .bind(input.cover_image_url.as_ref().and_then(|v| v.as_deref()))
            .bind(input.is_paid)
            .bind(input.price_cents)
            .bind(input.touches_pricing())
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate an overlay set (set is_active = false).
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE overlay_sets SET is_active = false \
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
