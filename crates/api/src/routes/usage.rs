use axum::routing::post;
use axum::Router;

use crate::handlers::usage;
use crate::state::AppState;

/// Routes mounted at `/usage`.
///
/// ```text
/// POST /   -> record
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(usage::record))
}
