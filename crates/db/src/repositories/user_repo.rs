//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{UpsertUser, UserAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, external_id, email, role, created_at, updated_at";

/// Provides data access for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert the user or refresh email and role from the latest claims.
    ///
    /// Uses `ON CONFLICT (external_id) DO UPDATE` so repeated calls are
    /// idempotent.
    pub async fn upsert(pool: &PgPool, input: &UpsertUser) -> Result<UserAccount, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (external_id, email, role) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (external_id) DO UPDATE SET \
                 email = COALESCE(EXCLUDED.email, users.email), \
                 role = EXCLUDED.role \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserAccount>(&query)
            .bind(&input.external_id)
            .bind(&input.email)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by the identity provider's subject.
    pub async fn find_by_external_id(
        pool: &PgPool,
        external_id: &str,
    ) -> Result<Option<UserAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE external_id = $1");
        sqlx::query_as::<_, UserAccount>(&query)
            .bind(external_id)
            .fetch_optional(pool)
            .await
    }

    /// List all users, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, UserAccount>(&query).fetch_all(pool).await
    }
}
