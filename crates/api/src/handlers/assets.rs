//! Admin handlers for the assets inside an overlay set.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glaze_core::catalog::{validate_aspect_ratio, validate_asset, validate_reorder};
use glaze_core::error::CoreError;
use glaze_core::overlay::{validate_value, OverlayKind};
use glaze_core::types::DbId;
use glaze_db::models::overlay_asset::{CreateOverlayAsset, ReorderAssets, UpdateOverlayAsset};
use glaze_db::repositories::{OverlayAssetRepo, OverlaySetRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn asset_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "OverlayAsset",
        id,
    })
}

async fn ensure_set_exists(state: &AppState, set_id: DbId) -> AppResult<()> {
    OverlaySetRepo::find_by_id(&state.pool, set_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OverlaySet",
            id: set_id,
        }))?;
    Ok(())
}

/// GET /api/admin/sets/{id}/assets?include_inactive=false
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(set_id): Path<DbId>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    ensure_set_exists(&state, set_id).await?;
    let assets =
        OverlayAssetRepo::list_for_set(&state.pool, set_id, params.include_inactive).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// POST /api/admin/sets/{id}/assets
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(set_id): Path<DbId>,
    Json(input): Json<CreateOverlayAsset>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_asset(&input.kind, &input.value, input.aspect_ratio)?;
    ensure_set_exists(&state, set_id).await?;

    let asset = OverlayAssetRepo::create(&state.pool, set_id, &input).await?;
    tracing::info!(
        set_id,
        asset_id = asset.id,
        kind = %asset.kind,
        admin = %admin.external_id,
        "Overlay asset added"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// PUT /api/admin/sets/{id}/assets/order
///
/// The body must list every active asset of the set exactly once.
pub async fn reorder(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(set_id): Path<DbId>,
    Json(input): Json<ReorderAssets>,
) -> AppResult<impl IntoResponse> {
    ensure_set_exists(&state, set_id).await?;
    let existing = OverlayAssetRepo::active_ids_for_set(&state.pool, set_id).await?;
    validate_reorder(&existing, &input.asset_ids)?;

    let assets = OverlayAssetRepo::reorder(&state.pool, set_id, &input.asset_ids).await?;
    tracing::debug!(set_id, count = assets.len(), "Overlay assets reordered");
    Ok(Json(DataResponse { data: assets }))
}

/// PUT /api/admin/assets/{id}
///
/// The kind is fixed at creation; a new value is checked against it.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOverlayAsset>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_aspect_ratio(input.aspect_ratio)?;

    if let Some(value) = &input.value {
        let existing = OverlayAssetRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| asset_not_found(id))?;
        validate_value(OverlayKind::from_name(&existing.kind)?, value)?;
    }

    let asset = OverlayAssetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| asset_not_found(id))?;
    Ok(Json(DataResponse { data: asset }))
}

/// DELETE /api/admin/assets/{id}
///
/// Soft delete; the asset stays restorable via update.
pub async fn deactivate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !OverlayAssetRepo::deactivate(&state.pool, id).await? {
        return Err(asset_not_found(id));
    }
    tracing::info!(asset_id = id, admin = %admin.external_id, "Overlay asset deactivated");
    Ok(StatusCode::NO_CONTENT)
}
