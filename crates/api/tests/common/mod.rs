#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use actory_api::auth::jwt::{generate_token, JwtConfig};
use actory_api::auth::password::hash_password;
use actory_api::config::{MediaConfig, ServerConfig};
use actory_api::router::build_app_router;
use actory_api::signaling::SignalingHub;
use actory_api::state::AppState;
use actory_db::models::user::{CreateUser, User};
use actory_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "secret123";

/// Build a test `ServerConfig` with safe defaults.
///
/// Mail is disabled (codes are only logged) and media signing uses fixed
/// credentials.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        frontend_url: "http://localhost:8080".to_string(),
        upload_dir: std::env::temp_dir().join("actory-test-uploads"),
        expiry_sweep_secs: 60,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_days: 30,
        },
        media: Some(MediaConfig {
            cloud_name: "demo-cloud".to_string(),
            api_key: "demo-key".to_string(),
            api_secret: "demo-secret".to_string(),
        }),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        signaling: Arc::new(SignalingHub::new()),
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).expect("request should build"))
        .await
        .expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a verified user with every field its role requires and return it
/// with a bearer token.
pub async fn create_user(pool: &PgPool, name: &str, role: &str) -> (User, String) {
    let is_actor = role == "Actor";
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{}@test.com", name.to_lowercase().replace(' ', ".")),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
        phone: Some("+1 555 0100".to_string()),
        location: Some("Mumbai".to_string()),
        age: is_actor.then_some(28),
        gender: is_actor.then(|| "female".to_string()),
        experience_level: is_actor.then(|| "intermediate".to_string()),
        bio: None,
        company_name: (role == "Producer").then(|| "Acme Films".to_string()),
        website: None,
        skills: Vec::new(),
        is_email_verified: true,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    let token = generate_token(user.id, &test_config().jwt).expect("token should sign");
    (user, token)
}

/// A valid casting call body whose dates all lie in the future.
pub fn casting_call_body(role_name: &str) -> Value {
    let now = Utc::now();
    json!({
        "role_name": role_name,
        "description": "Lead role in an indie feature",
        "age_min": 20,
        "age_max": 35,
        "location": "Mumbai",
        "skills": ["acting", " dance "],
        "submission_deadline": now + Duration::days(5),
        "audition_date": now + Duration::days(10),
        "shoot_start_date": now + Duration::days(20),
        "shoot_end_date": now + Duration::days(40),
    })
}

/// Create a casting call through the API and return its id.
pub async fn create_casting_call(pool: &PgPool, producer_token: &str, role_name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/casting",
        casting_call_body(role_name),
        producer_token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("call id")
}

/// A valid audition submission body.
pub fn submission_body() -> Value {
    json!({
        "title": "My audition",
        "video_url": "https://media.example.com/v/1.mp4",
        "height_cm": 170,
        "weight_kg": 60,
        "age": 28,
        "skin_tone": "medium",
        "skills": ["acting"],
        "permanent_address": "12 Hill Road",
        "living_city": "Mumbai",
        "date_of_birth": "1997-04-12",
        "phone_number": "+1 555 0100",
        "email": "actor@test.com",
    })
}
