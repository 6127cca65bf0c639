//! Customer purchase routes. All require a session.

use axum::routing::get;
use axum::Router;

use crate::handlers::purchases;
use crate::state::AppState;

/// Routes mounted at `/purchases`.
///
/// ```text
/// GET  /   -> list_mine
/// POST /   -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(purchases::list_mine).post(purchases::create))
}
