use axum::routing::post;
use axum::Router;

use crate::handlers::migrate;
use crate::state::AppState;

/// Routes mounted at `/migrate`.
///
/// ```text
/// POST /?seed=0|1   -> run
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(migrate::run))
}
