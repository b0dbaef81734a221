#![allow(dead_code)] // each test binary uses a subset of these helpers

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::util::ServiceExt;

use skillswap_api::auth::jwt::{generate_access_token, JwtConfig};
use skillswap_api::config::ServerConfig;
use skillswap_api::feed::FeedService;
use skillswap_api::notifications::NotificationCache;
use skillswap_api::router::build_app_router;
use skillswap_api::state::AppState;
use skillswap_db::models::profile::CreateProfile;
use skillswap_db::repositories::ProfileRepo;

/// Shared secret the expiry trigger tests present.
pub const TEST_CRON_SECRET: &str = "test-cron-secret";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cron_secret: Some(TEST_CRON_SECRET.to_string()),
        expiry_interval_secs: None,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (gate, CORS, request ID,
/// timeout, tracing, panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> (Router, AppState) {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifications: Arc::new(NotificationCache::new()),
        feed: Arc::new(FeedService::new()),
    };
    (build_app_router(state.clone(), &config), state)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A registered test user with a valid access token.
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub token: String,
}

/// Create a profile directly through the repository and mint an access
/// token for it. Onboarding starts incomplete, matching registration.
pub async fn create_user(pool: &PgPool, name: &str) -> TestUser {
    let profile = ProfileRepo::create(
        pool,
        &CreateProfile {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "$argon2id$unused-in-token-tests".to_string(),
        },
    )
    .await
    .expect("profile creation should succeed");

    let token = generate_access_token(profile.id, &profile.email, &test_config().jwt)
        .expect("token generation should succeed");

    TestUser {
        id: profile.id,
        username: profile.username,
        token,
    }
}

/// Create a user and mark onboarding complete.
pub async fn create_onboarded_user(pool: &PgPool, name: &str) -> TestUser {
    let user = create_user(pool, name).await;
    ProfileRepo::complete_onboarding(pool, user.id)
        .await
        .expect("onboarding flag update should succeed");
    user
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

pub async fn get(app: &Router, path: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn get_auth(app: &Router, path: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: &Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_empty_auth(app: &Router, path: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: &Router, path: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert a response is an error with the given status and error code.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
}
