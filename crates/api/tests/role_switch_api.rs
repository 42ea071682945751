//! HTTP-level integration tests for actor-to-producer switch requests and
//! their admin review.

mod common;

use actory_db::repositories::UserRepo;
use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, post_auth, post_json_auth, put_auth};
use serde_json::json;
use sqlx::PgPool;

async fn request_switch(pool: &PgPool, token: &str) -> axum::http::Response<axum::body::Body> {
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/v1/actor/request-switch",
        json!({ "reason": "I have started producing short films" }),
        token,
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_pending_request_is_rejected(pool: PgPool) {
    let (_, token) = create_user(&pool, "Act", "Actor").await;

    let response = request_switch(&pool, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["status"], "Pending");

    let response = request_switch(&pool, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_reason_is_rejected(pool: PgPool) {
    let (_, token) = create_user(&pool, "Act", "Actor").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/actor/request-switch",
        json!({ "reason": "   " }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_producer_cannot_request_switch(pool: PgPool) {
    let (_, token) = create_user(&pool, "Prod", "Producer").await;
    let response = request_switch(&pool, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_approval_promotes_actor(pool: PgPool) {
    let (actor, actor_token) = create_user(&pool, "Act", "Actor").await;
    let (admin, admin_token) = create_user(&pool, "Boss", "Admin").await;

    let response = request_switch(&pool, &actor_token).await;
    let request_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/switch-requests", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["actor_name"], "Act");

    let app = common::build_test_app(pool.clone());
    let response = put_auth(
        app,
        &format!("/api/v1/admin/switch-requests/{request_id}/approve"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Approved");
    assert_eq!(json["data"]["reviewed_by"], admin.id);

    let user = UserRepo::find_by_id(&pool, actor.id).await.unwrap().unwrap();
    assert_eq!(user.role, "Producer");

    // Already reviewed.
    let app = common::build_test_app(pool);
    let response = put_auth(
        app,
        &format!("/api/v1/admin/switch-requests/{request_id}/reject"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejection_keeps_role_and_allows_new_request(pool: PgPool) {
    let (actor, actor_token) = create_user(&pool, "Act", "Actor").await;
    let (_, admin_token) = create_user(&pool, "Boss", "Admin").await;

    let response = request_switch(&pool, &actor_token).await;
    let request_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_auth(
        app,
        &format!("/api/v1/admin/switch-requests/{request_id}/reject"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let user = UserRepo::find_by_id(&pool, actor.id).await.unwrap().unwrap();
    assert_eq!(user.role, "Actor");

    let response = request_switch(&pool, &actor_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_admin_cannot_review(pool: PgPool) {
    let (_, actor_token) = create_user(&pool, "Act", "Actor").await;
    let (_, producer_token) = create_user(&pool, "Prod", "Producer").await;

    let response = request_switch(&pool, &actor_token).await;
    let request_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_auth(
        app,
        &format!("/api/v1/admin/switch-requests/{request_id}/approve"),
        &producer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_routes_accept_put_only(pool: PgPool) {
    let (_, actor_token) = create_user(&pool, "Act", "Actor").await;
    let (_, admin_token) = create_user(&pool, "Boss", "Admin").await;

    let response = request_switch(&pool, &actor_token).await;
    let request_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/admin/switch-requests/{request_id}/approve"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let app = common::build_test_app(pool);
    let response = put_auth(
        app,
        &format!("/api/v1/admin/switch-requests/{request_id}/approve"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
