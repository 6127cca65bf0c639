//! Repository for the `catalog_categories` table.

use glaze_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{CatalogCategory, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, order_index, created_at, updated_at";

/// Provides CRUD operations for catalog categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategory,
    ) -> Result<CatalogCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO catalog_categories (name, slug, order_index) \
             VALUES ($1, $2, COALESCE($3, 0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatalogCategory>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CatalogCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM catalog_categories WHERE id = $1");
        sqlx::query_as::<_, CatalogCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories ordered by `order_index`, then name.
    pub async fn list(pool: &PgPool) -> Result<Vec<CatalogCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM catalog_categories ORDER BY order_index, name");
        sqlx::query_as::<_, CatalogCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a category. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<CatalogCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE catalog_categories SET \
                name = COALESCE($2, name), \
                order_index = COALESCE($3, order_index) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatalogCategory>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Sets filed under it become uncategorized.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM catalog_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
