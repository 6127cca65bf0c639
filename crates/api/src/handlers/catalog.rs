//! Public catalog handlers: what the editor shows in its set picker.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use glaze_core::catalog::UNCATEGORIZED_KEY;
use glaze_core::error::CoreError;
use glaze_core::types::DbId;
use glaze_db::models::category::CatalogCategory;
use glaze_db::models::overlay_set::OverlaySetWithAssets;
use glaze_db::repositories::{CategoryRepo, OverlaySetRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::query::parse_flag;
use crate::response::{DataResponse, ItemsResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub catalog: Option<String>,
}

/// Categories plus active sets grouped under their category id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub categories: Vec<CatalogCategory>,
    pub sets_by_category: BTreeMap<String, Vec<OverlaySetWithAssets>>,
}

/// Group sets by category id.
///
/// Every category gets a key, even when empty, so the client can render
/// headers straight from `categories`. Sets without a category land under
/// [`UNCATEGORIZED_KEY`], which only appears when such sets exist. Input
/// order is preserved within each group.
pub fn group_by_category(
    categories: &[CatalogCategory],
    sets: Vec<OverlaySetWithAssets>,
) -> BTreeMap<String, Vec<OverlaySetWithAssets>> {
    let mut grouped: BTreeMap<String, Vec<OverlaySetWithAssets>> = categories
        .iter()
        .map(|c| (c.id.to_string(), Vec::new()))
        .collect();

    for set in sets {
        let key = match set.set.category_id {
            Some(id) => id.to_string(),
            None => UNCATEGORIZED_KEY.to_string(),
        };
        grouped.entry(key).or_default().push(set);
    }
    grouped
}

/// GET /api/sets[?catalog=1]
///
/// Without `catalog`, a flat `{ items }` list of active sets. With it, the
/// grouped catalog with each set's active assets.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> AppResult<Response> {
    if !parse_flag("catalog", params.catalog.as_deref())? {
        let items = OverlaySetRepo::list(&state.pool, false).await?;
        return Ok(Json(ItemsResponse { items }).into_response());
    }

    let categories = CategoryRepo::list(&state.pool).await?;
    let sets = OverlaySetRepo::list_active_with_assets(&state.pool).await?;
    tracing::debug!(
        categories = categories.len(),
        sets = sets.len(),
        "Serving grouped catalog"
    );

    let sets_by_category = group_by_category(&categories, sets);
    Ok(Json(CatalogResponse {
        categories,
        sets_by_category,
    })
    .into_response())
}

/// GET /api/sets/{id}
///
/// One active set with its active assets. Inactive sets are reported as
/// missing.
pub async fn get_set(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let set = OverlaySetRepo::find_with_assets(&state.pool, id, false)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OverlaySet",
            id,
        }))?;
    Ok(Json(DataResponse { data: set }))
}
