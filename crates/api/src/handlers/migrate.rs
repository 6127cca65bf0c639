use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::parse_flag;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MigrateParams {
    pub seed: Option<String>,
}

/// Result of a migration run.
///
/// `seeded` only reflects the request's `seed` flag. No sample data is ever
/// inserted, so `seeded: true` does not mean any rows were written.
#[derive(Debug, Serialize)]
pub struct MigrateResponse {
    pub ok: bool,
    pub seeded: bool,
}

/// POST /api/migrate?seed=0|1
///
/// Apply the schema script. Already-applied migrations are skipped. The
/// `seed` flag is validated and echoed back but triggers no seeding.
pub async fn run(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<MigrateParams>,
) -> AppResult<Json<MigrateResponse>> {
    let seeded = parse_flag("seed", params.seed.as_deref())?;

    glaze_db::run_migrations(&state.pool)
        .await
        .map_err(|e| AppError::InternalError(format!("Migration failed: {e}")))?;
    tracing::info!(seed = seeded, admin = %admin.external_id, "Schema migrations applied");

    Ok(Json(MigrateResponse { ok: true, seeded }))
}
