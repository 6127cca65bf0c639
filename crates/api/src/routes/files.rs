use axum::routing::get;
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

/// Routes mounted at `/files`.
///
/// ```text
/// GET /{*path}   -> serve
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{*path}", get(files::serve))
}
