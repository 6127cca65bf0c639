//! Public catalog routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/sets`.
///
/// ```text
/// GET /       -> list (or grouped catalog with ?catalog=1)
/// GET /{id}   -> get
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list))
        .route("/{id}", get(catalog::get_set))
}
