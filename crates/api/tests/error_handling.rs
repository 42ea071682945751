//! Error envelope shape across the API.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, create_user, get_auth, post_json};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_not_found_envelope(pool: PgPool) {
    let (_, token) = create_user(&pool, "Prod", "Producer").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/casting/999999/videos", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_field_errors_are_listed(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "name": "V",
            "email": "v@test.com",
            "password": "secret123",
            "role": "Producer",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"]["name"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/messages/conversations").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}
