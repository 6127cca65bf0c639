pub mod admin;
pub mod files;
pub mod health;
pub mod migrate;
pub mod purchases;
pub mod sets;
pub mod thumbnails;
pub mod usage;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /sets                                    public catalog (?catalog=1 grouped)
/// /sets/{id}                               one active set with its assets
/// /files/{*path}                           raw stored file
/// /thumbnails                              JPEG thumbnail of an uploaded image (POST)
/// /usage                                   append a usage event (POST)
///
/// /purchases                               caller's ledger, start purchase (auth)
///
/// /admin?list=sets|categories|...          admin listings (admin only)
/// /admin/categories                        create
/// /admin/categories/{id}                   update, delete
/// /admin/sets                              create
/// /admin/sets/{id}                         get, update, deactivate
/// /admin/sets/{id}/assets                  list, create
/// /admin/sets/{id}/assets/order            reorder (PUT)
/// /admin/assets/{id}                       update, deactivate
/// /admin/purchases/{id}/status             status transition (PUT)
/// /admin/files                             multipart upload (POST)
///
/// /migrate?seed=0|1                        apply schema script (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sets", sets::router())
        .nest("/files", files::router())
        .nest("/thumbnails", thumbnails::router())
        .nest("/usage", usage::router())
        .nest("/purchases", purchases::router())
        .nest("/admin", admin::router())
        .nest("/migrate", migrate::router())
}
