//! HTTP-level tests for the page gate middleware.
//!
//! Requests go through the full router, so these exercise the
//! classify-first short-circuit, the fail-closed redirect, the onboarding
//! redirect, and refresh-cookie rotation.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use common::{build_test_app, create_onboarded_user, create_user, get, send, test_config};
use skillswap_api::auth::jwt::{generate_access_token, generate_refresh_token};
use skillswap_db::models::session::CreateSession;
use skillswap_db::repositories::SessionRepo;
use sqlx::PgPool;

fn location(response: &axum::http::Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
}

async fn get_with_cookie(
    app: &axum::Router,
    path: &str,
    cookie: &str,
) -> axum::http::Response<Body> {
    send(
        app,
        Request::builder()
            .uri(path)
            .header("cookie", cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

// ---------------------------------------------------------------------------
// Public paths are served without a session
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn public_paths_are_served_without_session(pool: PgPool) {
    let (app, _state) = build_test_app(pool);

    for path in ["/", "/login", "/register", "/explore", "/posts/123", "/users/alice"] {
        let response = get(&app, path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_path_ignores_broken_credentials(pool: PgPool) {
    let (app, _state) = build_test_app(pool);

    // Garbage cookies must not matter on a public path: the gate decides
    // on the path alone, before any session resolution.
    let response = get_with_cookie(
        &app,
        "/explore",
        "ss_access=not-a-jwt; ss_refresh=not-a-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Protected paths fail closed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_path_without_session_redirects_to_login(pool: PgPool) {
    let (app, _state) = build_test_app(pool);

    for path in ["/dashboard", "/posts/new", "/posts/7/edit", "/settings"] {
        let response = get(&app, path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), "/login", "{path}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_access_cookie_is_treated_as_no_session(pool: PgPool) {
    let (app, _state) = build_test_app(pool);

    let response = get_with_cookie(&app, "/dashboard", "ss_access=garbage").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn token_for_deleted_profile_fails_closed(pool: PgPool) {
    let (app, _state) = build_test_app(pool.clone());

    // A syntactically valid token whose subject has no profile row.
    let token = generate_access_token(999_999, "ghost@example.com", &test_config().jwt).unwrap();
    let response = get_with_cookie(&app, "/dashboard", &format!("ss_access={token}")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

// ---------------------------------------------------------------------------
// Onboarding precedence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn incomplete_onboarding_redirects_to_onboarding(pool: PgPool) {
    let (app, _state) = build_test_app(pool.clone());

    let user = create_user(&pool, "newcomer").await;
    let cookie = format!("ss_access={}", user.token);

    let response = get_with_cookie(&app, "/dashboard", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/onboarding");

    // The onboarding page itself must stay reachable.
    let response = get_with_cookie(&app, "/onboarding", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn onboarded_user_reaches_protected_pages(pool: PgPool) {
    let (app, _state) = build_test_app(pool.clone());

    let user = create_onboarded_user(&pool, "veteran").await;
    let cookie = format!("ss_access={}", user.token);

    let response = get_with_cookie(&app, "/dashboard", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Refresh-cookie rotation is propagated onto the response
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_cookie_rotates_session_and_sets_cookies(pool: PgPool) {
    let (app, _state) = build_test_app(pool.clone());

    let user = create_onboarded_user(&pool, "returning").await;

    // Persist a refresh session, as login would have.
    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash.clone(),
            expires_at: Utc::now() + Duration::days(7),
        },
    )
    .await
    .unwrap();

    // No access cookie; only the refresh cookie.
    let response =
        get_with_cookie(&app, "/dashboard", &format!("ss_refresh={refresh_plaintext}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(
        set_cookies.iter().any(|c| c.starts_with("ss_access=")),
        "rotated access cookie must be set, got: {set_cookies:?}"
    );
    assert!(
        set_cookies.iter().any(|c| c.starts_with("ss_refresh=")),
        "rotated refresh cookie must be set, got: {set_cookies:?}"
    );

    // Rotation is single-use: the old refresh token is now revoked.
    let stale = SessionRepo::find_by_refresh_token_hash(&pool, &refresh_hash)
        .await
        .unwrap();
    assert!(stale.is_none(), "presented refresh token must be revoked");

    // Replaying the old cookie fails closed.
    let response =
        get_with_cookie(&app, "/dashboard", &format!("ss_refresh={refresh_plaintext}")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

// ---------------------------------------------------------------------------
// API routes are not gated
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn api_routes_answer_401_json_instead_of_redirecting(pool: PgPool) {
    let (app, _state) = build_test_app(pool);

    let response = get(&app, "/api/v1/notifications").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}
