//! Admin handlers for overlay sets.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glaze_core::catalog::{validate_name, validate_pricing, validate_slug};
use glaze_core::error::CoreError;
use glaze_core::types::DbId;
use glaze_db::models::overlay_set::{CreateOverlaySet, OverlaySetSummary, UpdateOverlaySet};
use glaze_db::repositories::{CategoryRepo, OverlaySetRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "OverlaySet",
        id,
    })
}

/// Reject a reference to a category that does not exist.
async fn ensure_category_exists(state: &AppState, category_id: Option<DbId>) -> AppResult<()> {
    let Some(category_id) = category_id else {
        return Ok(());
    };
    if CategoryRepo::find_by_id(&state.pool, category_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Category {category_id} does not exist"
        ))));
    }
    Ok(())
}

/// Pricing after applying `input` to `existing`.
///
/// When the update touches pricing, an absent `price_cents` clears the
/// price, matching the repository's replacement rule.
fn effective_pricing(existing: &OverlaySetSummary, input: &UpdateOverlaySet) -> (bool, Option<i32>) {
    if !input.touches_pricing() {
        return (existing.is_paid, existing.price_cents);
    }
    (input.is_paid.unwrap_or(existing.is_paid), input.price_cents)
}

/// POST /api/admin/sets
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateOverlaySet>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_name("title", &input.title)?;
    validate_slug(&input.slug)?;
    validate_pricing(input.is_paid, input.price_cents)?;
    ensure_category_exists(&state, input.category_id).await?;

    let set = OverlaySetRepo::create(&state.pool, &input).await?;
    tracing::info!(
        set_id = set.id,
        slug = %set.slug,
        is_paid = set.is_paid,
        admin = %admin.external_id,
        "Overlay set created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: set })))
}

/// GET /api/admin/sets/{id}
///
/// Includes inactive sets and inactive assets.
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let set = OverlaySetRepo::find_with_assets(&state.pool, id, true)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: set }))
}

/// PUT /api/admin/sets/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOverlaySet>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(title) = &input.title {
        validate_name("title", title)?;
    }

    let existing = OverlaySetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let (is_paid, price_cents) = effective_pricing(&existing, &input);
    validate_pricing(is_paid, price_cents)?;
    ensure_category_exists(&state, input.category_id.flatten()).await?;

    let set = OverlaySetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(set_id = id, admin = %admin.external_id, "Overlay set updated");
    Ok(Json(DataResponse { data: set }))
}

/// DELETE /api/admin/sets/{id}
///
/// Soft delete: the set disappears from the public catalog but purchases
/// keep referencing it.
pub async fn deactivate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !OverlaySetRepo::deactivate(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(set_id = id, admin = %admin.external_id, "Overlay set deactivated");
    Ok(StatusCode::NO_CONTENT)
}
