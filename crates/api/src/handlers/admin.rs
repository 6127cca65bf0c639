//! Admin listing endpoint.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use glaze_db::repositories::{CategoryRepo, OverlaySetRepo, PurchaseRepo, UsageStatRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ItemsResponse;
use crate::state::AppState;

/// Number of usage events returned by `?list=usage`.
const RECENT_USAGE_LIMIT: i64 = 200;

/// Listings available under `GET /api/admin?list=`.
pub const VALID_LISTS: &[&str] = &["sets", "categories", "purchases", "users", "usage"];

#[derive(Debug, Deserialize)]
pub struct AdminListParams {
    pub list: Option<String>,
}

/// GET /api/admin?list=sets|categories|purchases|users|usage
///
/// `{ items }` for the requested entity. Sets include inactive ones.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AdminListParams>,
) -> AppResult<Response> {
    let list = params.list.as_deref().ok_or_else(|| {
        AppError::BadRequest(format!("Missing 'list' parameter. Expected one of: {VALID_LISTS:?}"))
    })?;

    let response = match list {
        "sets" => Json(ItemsResponse {
            items: OverlaySetRepo::list(&state.pool, true).await?,
        })
        .into_response(),
        "categories" => Json(ItemsResponse {
            items: CategoryRepo::list(&state.pool).await?,
        })
        .into_response(),
        "purchases" => Json(ItemsResponse {
            items: PurchaseRepo::list(&state.pool).await?,
        })
        .into_response(),
        "users" => Json(ItemsResponse {
            items: UserRepo::list(&state.pool).await?,
        })
        .into_response(),
        "usage" => Json(ItemsResponse {
            items: UsageStatRepo::list_recent(&state.pool, RECENT_USAGE_LIMIT).await?,
        })
        .into_response(),
        other => {
            return Err(AppError::BadRequest(format!(
                "Unknown list '{other}'. Expected one of: {VALID_LISTS:?}"
            )))
        }
    };
    Ok(response)
}
