use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glaze_core::usage::{validate_event, validate_meta};
use glaze_db::models::usage_stat::CreateUsageStat;
use glaze_db::repositories::UsageStatRepo;

use crate::error::AppResult;
use crate::middleware::auth::OptionalAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/usage
///
/// Append a usage event. Anonymous callers are recorded without a user.
pub async fn record(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
    Json(mut input): Json<CreateUsageStat>,
) -> AppResult<impl IntoResponse> {
    validate_event(&input.event)?;
    validate_meta(&input.meta)?;

    input.user_id = match user {
        Some(user) => Some(user.upsert_account(&state.pool).await?.id),
        None => None,
    };

    let stat = UsageStatRepo::create(&state.pool, &input).await?;
    tracing::debug!(event = %stat.event, set_id = ?stat.set_id, "Usage recorded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: stat })))
}
