//! HTTP tests for the admin surface: RBAC, listings and catalog management.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, customer_token, delete_auth, get, get_auth, post_json,
    post_json_auth, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_set(app: axum::Router, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app, "/api/admin/sets", body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn create_css_asset(app: axum::Router, set_id: i64, value: &str) -> i64 {
    let response = post_json_auth(
        app,
        &format!("/api/admin/sets/{set_id}/assets"),
        json!({ "kind": "css", "value": value }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_require_a_session(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/admin?list=sets").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = post_json(app, "/api/admin/sets", json!({ "title": "x", "slug": "x" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_reject_customers(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = customer_token("idp|alice");

    let response = get_auth(app.clone(), "/api/admin?list=sets", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        app,
        "/api/admin/categories",
        json!({ "name": "Film", "slug": "film" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/admin?list=sets", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_sets_includes_inactive(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();

    create_set(app.clone(), json!({ "title": "Alpha", "slug": "alpha" })).await;
    let beta = create_set(app.clone(), json!({ "title": "Beta", "slug": "beta" })).await;
    let beta_id = beta["id"].as_i64().unwrap();
    let response = delete_auth(app.clone(), &format!("/api/admin/sets/{beta_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get_auth(app, "/api/admin?list=sets", &token).await).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().any(|s| s["isActive"] == false));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_validates_the_list_parameter(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();

    for list in ["categories", "purchases", "users", "usage"] {
        let response = get_auth(app.clone(), &format!("/api/admin?list={list}"), &token).await;
        assert_eq!(response.status(), StatusCode::OK, "list={list}");
        assert!(body_json(response).await["items"].is_array());
    }

    let response = get_auth(app.clone(), "/api/admin?list=secrets", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(app, "/api/admin", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_crud(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();

    let response = post_json_auth(
        app.clone(),
        "/api/admin/categories",
        json!({ "name": "Film", "slug": "film", "orderIndex": 2 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/admin/categories",
        json!({ "name": "Film again", "slug": "film" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/categories/{id}"),
        json!({ "name": "Film Stocks" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Film Stocks");
    assert_eq!(json["data"]["orderIndex"], 2);

    let uri = format!("/api/admin/categories/{id}");
    assert_eq!(delete_auth(app.clone(), &uri, &token).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete_auth(app, &uri, &token).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_slug_must_be_kebab_case(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/admin/categories",
        json!({ "name": "Film", "slug": "Film Stocks" }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Overlay sets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_pricing_rules_are_enforced(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();

    for body in [
        json!({ "title": "Paid", "slug": "paid", "isPaid": true }),
        json!({ "title": "Paid", "slug": "paid", "isPaid": true, "priceCents": 0 }),
        json!({ "title": "Free", "slug": "free", "priceCents": 100 }),
    ] {
        let response = post_json_auth(app.clone(), "/api/admin/sets", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let set = create_set(
        app.clone(),
        json!({ "title": "Paid", "slug": "paid", "isPaid": true, "priceCents": 499 }),
    )
    .await;
    assert_eq!(set["priceCents"], 499);
    let id = set["id"].as_i64().unwrap();

    // Switching to free clears the price; going back to paid needs one.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/sets/{id}"),
        json!({ "isPaid": false }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["isPaid"], false);
    assert!(json["data"]["priceCents"].is_null());

    let response = put_json_auth(
        app,
        &format!("/api/admin/sets/{id}"),
        json!({ "isPaid": true }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_with_unknown_category_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app.clone(),
        "/api/admin/sets",
        json!({ "title": "Grain", "slug": "grain", "categoryId": 424242 }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let set = create_set(app.clone(), json!({ "title": "Grain", "slug": "grain" })).await;
    let id = set["id"].as_i64().unwrap();
    let response = put_json_auth(
        app,
        &format!("/api/admin/sets/{id}"),
        json!({ "categoryId": 424242 }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn null_category_moves_set_to_uncategorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();
    let response = post_json_auth(
        app.clone(),
        "/api/admin/categories",
        json!({ "name": "Film", "slug": "film" }),
        &token,
    )
    .await;
    let category_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let set = create_set(
        app.clone(),
        json!({
            "title": "Grain",
            "slug": "grain",
            "categoryId": category_id,
            "description": "Fine grain",
        }),
    )
    .await;
    let id = set["id"].as_i64().unwrap();

    // A key left out keeps its value.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/sets/{id}"),
        json!({ "title": "Grain II" }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["categoryId"], category_id);
    assert_eq!(json["data"]["description"], "Fine grain");

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/sets/{id}"),
        json!({ "categoryId": null, "description": null }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["categoryId"].is_null());
    assert!(json["data"]["description"].is_null());

    let catalog = body_json(get(app, "/api/sets?catalog=1").await).await;
    let groups = &catalog["setsByCategory"];
    assert_eq!(groups["uncategorized"][0]["id"], id);
    assert!(groups[category_id.to_string()].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_get_includes_inactive_sets(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();
    let set = create_set(app.clone(), json!({ "title": "Grain", "slug": "grain" })).await;
    let id = set["id"].as_i64().unwrap();

    delete_auth(app.clone(), &format!("/api/admin/sets/{id}"), &token).await;

    let response = get_auth(app.clone(), &format!("/api/admin/sets/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["isActive"], false);

    // The public endpoint hides it.
    let response = get(app, &format!("/api/sets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn asset_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();
    let set = create_set(app.clone(), json!({ "title": "Grain", "slug": "grain" })).await;
    let set_id = set["id"].as_i64().unwrap();

    let a = create_css_asset(app.clone(), set_id, "linear-gradient(red, blue)").await;
    let b = create_css_asset(app.clone(), set_id, "radial-gradient(#fff, #000)").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/admin/sets/{set_id}/assets"),
        json!({
            "kind": "image",
            "value": "/api/files/textures/grain.png",
            "aspectRatio": 1.5
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let c = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Reorder to c, a, b.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/sets/{set_id}/assets/order"),
        json!({ "assetIds": [c, a, b] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let ids: Vec<i64> = body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![c, a, b]);

    // A partial order is rejected.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/sets/{set_id}/assets/order"),
        json!({ "assetIds": [a, b] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Soft delete hides the asset from the default list only.
    let response = delete_auth(app.clone(), &format!("/api/admin/assets/{b}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(
        get_auth(app.clone(), &format!("/api/admin/sets/{set_id}/assets"), &token).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(
        get_auth(
            app,
            &format!("/api/admin/sets/{set_id}/assets?include_inactive=true"),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn asset_value_must_match_kind(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();
    let set = create_set(app.clone(), json!({ "title": "Grain", "slug": "grain" })).await;
    let set_id = set["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/admin/sets/{set_id}/assets"),
        json!({ "kind": "image", "value": "linear-gradient(red, blue)" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/admin/sets/{set_id}/assets"),
        json!({ "kind": "video", "value": "clip.mp4" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Updating a css asset with an image URL is rejected as well.
    let id = create_css_asset(app.clone(), set_id, "linear-gradient(red, blue)").await;
    let response = put_json_auth(
        app,
        &format!("/api/admin/assets/{id}"),
        json!({ "value": "https://cdn.example.com/grain.png" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assets_for_missing_set_are_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/admin/sets/999999/assets",
        json!({ "kind": "css", "value": "red" }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
