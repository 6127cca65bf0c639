//! HTTP tests for `POST /api/migrate`.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, customer_token, get, post_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn migrate_is_idempotent_and_echoes_seed(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();

    let response = post_auth(app.clone(), "/api/migrate", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["seeded"], false);

    let response = post_auth(app.clone(), "/api/migrate?seed=1", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["seeded"], true);

    // The flag is only echoed: the catalog stays empty.
    let catalog = body_json(get(app, "/api/sets?catalog=1").await).await;
    assert!(catalog["categories"].as_array().unwrap().is_empty());
    assert!(catalog["setsByCategory"].as_object().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn migrate_is_admin_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/migrate", &customer_token("idp|alice")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_seed_flag_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/migrate?seed=lots", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
