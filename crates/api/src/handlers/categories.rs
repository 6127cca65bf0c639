//! Admin handlers for catalog categories.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glaze_core::catalog::{validate_name, validate_slug};
use glaze_core::error::CoreError;
use glaze_core::types::DbId;
use glaze_db::models::category::{CreateCategory, UpdateCategory};
use glaze_db::repositories::CategoryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/admin/categories
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_name("name", &input.name)?;
    validate_slug(&input.slug)?;

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        category_id = category.id,
        slug = %category.slug,
        admin = %admin.external_id,
        "Category created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/admin/categories/{id}
///
/// Rename or reorder a category. The slug is immutable.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CatalogCategory",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/admin/categories/{id}
///
/// Hard delete. Sets filed under the category become uncategorized.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CatalogCategory",
            id,
        }));
    }
    tracing::info!(category_id = id, admin = %admin.external_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
