//! Repository for the append-only `usage_stats` table.

use sqlx::PgPool;

use crate::models::usage_stat::{CreateUsageStat, UsageStat};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, set_id, event, meta, created_at";

/// Provides insert and read access for usage events.
pub struct UsageStatRepo;

impl UsageStatRepo {
    /// Append a usage event.
    pub async fn create(pool: &PgPool, input: &CreateUsageStat) -> Result<UsageStat, sqlx::Error> {
        let query = format!(
            "INSERT INTO usage_stats (user_id, set_id, event, meta) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UsageStat>(&query)
            .bind(input.user_id)
            .bind(input.set_id)
            .bind(&input.event)
            .bind(&input.meta)
            .fetch_one(pool)
            .await
    }

    /// Most recent events, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<UsageStat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM usage_stats ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, UsageStat>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Number of recorded events with the given name.
    pub async fn count_for_event(pool: &PgPool, event: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM usage_stats WHERE event = $1")
            .bind(event)
            .fetch_one(pool)
            .await
    }
}
