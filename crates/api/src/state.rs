use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::FileStore;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone; everything heavy sits behind an `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: glaze_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Backing store for uploaded overlay textures and covers.
    pub files: Arc<dyn FileStore>,
}
