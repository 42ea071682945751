//! HTTP-level integration tests for registration, login and account
//! self-service under `/api/v1/auth`.

mod common;

use actory_api::auth::jwt::hash_reset_token;
use actory_api::auth::password::hash_password;
use actory_db::models::user::CreateUser;
use actory_db::repositories::{PendingRegistrationRepo, UserRepo};
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    body_json, create_user, get, get_auth, post_json, put_json, put_json_auth, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn actor_registration(email: &str) -> serde_json::Value {
    json!({
        "name": "Asha Rao",
        "email": email,
        "password": "secret123",
        "role": "Actor",
        "phone": "+91 98765 43210",
        "location": "Pune",
        "age": 24,
        "gender": "female",
        "experience_level": "beginner",
    })
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Register, confirm the emailed code, then log in.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_verify_login_flow(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        actor_registration("Asha@Example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["email"], "asha@example.com");

    // No user row exists until the code is confirmed.
    assert!(UserRepo::find_by_email(&pool, "asha@example.com")
        .await
        .unwrap()
        .is_none());

    let pending = PendingRegistrationRepo::find_by_email(&pool, "asha@example.com")
        .await
        .unwrap()
        .expect("pending registration");
    assert_eq!(pending.otp.len(), 6);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/verify-email",
        json!({ "email": "asha@example.com", "otp": pending.otp }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "asha@example.com", "password": "secret123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["role"], "Actor");
    assert_eq!(json["user"]["is_email_verified"], true);
    assert!(json["user"]["password_hash"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_verify_with_wrong_otp_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/auth/register", actor_registration("a@b.com")).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/verify-email",
        json!({ "email": "a@b.com", "otp": "not-it" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_with_taken_email_conflicts(pool: PgPool) {
    let (user, _) = create_user(&pool, "Taken", "Actor").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        actor_registration(&user.email),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_actor_without_age_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = actor_registration("noage@test.com");
    body.as_object_mut().unwrap().remove("age");

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_as_admin_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = actor_registration("boss@test.com");
    body["role"] = json!("Admin");

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_short_name_reports_field_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = actor_registration("short@test.com");
    body["name"] = json!("A");

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"]["name"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resend_without_pending_registration_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/resend-verification",
        json!({ "email": "nobody@test.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resend_replaces_the_code(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/auth/register", actor_registration("re@test.com")).await;
    let before = PendingRegistrationRepo::find_by_email(&pool, "re@test.com")
        .await
        .unwrap()
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/resend-verification",
        json!({ "email": "re@test.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = PendingRegistrationRepo::find_by_email(&pool, "re@test.com")
        .await
        .unwrap()
        .unwrap();
    assert!(after.expire_at >= before.expire_at);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let (user, _) = create_user(&pool, "Wrongpw", "Actor").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": user.email, "password": "incorrect" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "ghost@test.com", "password": "whatever" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unverified_email_is_forbidden(pool: PgPool) {
    let input = CreateUser {
        name: "Unverified".into(),
        email: "unverified@test.com".into(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role: "Producer".into(),
        phone: Some("+1 555 0100".into()),
        location: Some("Delhi".into()),
        age: None,
        gender: None,
        experience_level: None,
        bio: None,
        company_name: Some("Studio".into()),
        website: None,
        skills: vec![],
        is_email_verified: false,
    };
    UserRepo::create(&pool, &input).await.unwrap();
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "unverified@test.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_email_availability(pool: PgPool) {
    let (user, _) = create_user(&pool, "Present", "Actor").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/auth/check-email?email={}", user.email)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["available"], false);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/check-email?email=free@test.com").await;
    assert_eq!(body_json(response).await["available"], true);
}

// ---------------------------------------------------------------------------
// Current user
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_with_garbage_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/me", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_accepts_query_token(pool: PgPool) {
    let (user, token) = create_user(&pool, "Query", "Actor").await;
    let app = common::build_test_app(pool);

    let response = get(app, &format!("/api/v1/auth/me?token={token}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_for_deleted_user_is_forbidden(pool: PgPool) {
    let (user, token) = create_user(&pool, "Gone", "Actor").await;
    UserRepo::delete(&pool, user.id).await.unwrap();
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_me_revalidates_profile(pool: PgPool) {
    let (_, token) = create_user(&pool, "Editor", "Actor").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/auth/me",
        json!({ "bio": "Stage actor", "age": 30 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["bio"], "Stage actor");
    assert_eq!(json["data"]["age"], 30);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, "/api/v1/auth/me", json!({ "age": 500 }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = put_json_auth(app, "/api/v1/auth/me", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_password(pool: PgPool) {
    let (user, token) = create_user(&pool, "Rotator", "Producer").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/auth/updatepassword",
        json!({ "current_password": "wrong", "new_password": "newsecret" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/auth/updatepassword",
        json!({ "current_password": TEST_PASSWORD, "new_password": "newsecret" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["token"].is_string());

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": user.email, "password": "newsecret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_forgot_password_is_neutral_for_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/forgotpassword",
        json!({ "email": "nobody@test.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_forgot_password_stores_hashed_token(pool: PgPool) {
    let (user, _) = create_user(&pool, "Forgetful", "Actor").await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/v1/auth/forgotpassword",
        json!({ "email": user.email }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    let hash = stored.reset_password_token.expect("token stored");
    assert_eq!(hash.len(), 64);
    assert!(stored.reset_password_expire.unwrap() > Utc::now());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_password_with_token(pool: PgPool) {
    let (user, _) = create_user(&pool, "Resetter", "Actor").await;
    let raw = "known-reset-token";
    UserRepo::set_reset_token(
        &pool,
        user.id,
        Some(&hash_reset_token(raw)),
        Some(Utc::now() + Duration::minutes(10)),
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/auth/check-reset-token/{raw}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/auth/resetpassword/{raw}"),
        json!({ "password": "brandnew", "confirm_password": "different" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/auth/resetpassword/{raw}"),
        json!({ "password": "brandnew", "confirm_password": "brandnew" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Token is single-use.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/auth/check-reset-token/{raw}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_reset_token_is_rejected(pool: PgPool) {
    let (user, _) = create_user(&pool, "Late", "Actor").await;
    UserRepo::set_reset_token(
        &pool,
        user.id,
        Some(&hash_reset_token("stale")),
        Some(Utc::now() - Duration::minutes(1)),
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/check-reset-token/stale").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
