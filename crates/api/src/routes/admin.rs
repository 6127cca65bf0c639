//! Admin routes. Every handler takes [`RequireAdmin`](crate::middleware::rbac::RequireAdmin).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, assets, categories, files, overlay_sets, purchases};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /?list=...                  -> list
/// POST   /categories                 -> create
/// PUT    /categories/{id}            -> update
/// DELETE /categories/{id}            -> delete
/// POST   /sets                       -> create
/// GET    /sets/{id}                  -> get
/// PUT    /sets/{id}                  -> update
/// DELETE /sets/{id}                  -> deactivate
/// GET    /sets/{id}/assets           -> list
/// POST   /sets/{id}/assets           -> create
/// PUT    /sets/{id}/assets/order     -> reorder
/// PUT    /assets/{id}                -> update
/// DELETE /assets/{id}                -> deactivate
/// PUT    /purchases/{id}/status      -> update_status
/// POST   /files                      -> upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::list))
        .route("/categories", post(categories::create))
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::delete),
        )
        .route("/sets", post(overlay_sets::create))
        .route(
            "/sets/{id}",
            get(overlay_sets::get_by_id)
                .put(overlay_sets::update)
                .delete(overlay_sets::deactivate),
        )
        .route("/sets/{id}/assets", get(assets::list).post(assets::create))
        .route("/sets/{id}/assets/order", put(assets::reorder))
        .route("/assets/{id}", put(assets::update).delete(assets::deactivate))
        .route("/purchases/{id}/status", put(purchases::update_status))
        .route("/files", post(files::upload))
}
