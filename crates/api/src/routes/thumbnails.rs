use axum::routing::post;
use axum::Router;

use crate::handlers::thumbnails;
use crate::state::AppState;

/// Routes mounted at `/thumbnails`.
///
/// ```text
/// POST /   -> create (multipart field `file`)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(thumbnails::create))
}
