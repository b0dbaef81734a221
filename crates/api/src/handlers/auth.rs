//! Handlers for the `/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use skillswap_core::error::CoreError;
use skillswap_core::types::DbId;
use skillswap_db::models::profile::CreateProfile;
use skillswap_db::models::session::CreateSession;
use skillswap_db::repositories::{ProfileRepo, SessionRepo};

use crate::auth::cookies::{access_cookie, clear_cookies, refresh_cookie};
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by register, login, and
/// refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub onboarding_completed: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and sign the new user in.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username must not be empty".into(),
        )));
    }
    let email = input.email.trim().to_ascii_lowercase();
    if !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "email is not valid".into(),
        )));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let profile = ProfileRepo::create(
        &state.pool,
        &CreateProfile {
            username: username.to_string(),
            email,
            password_hash,
        },
    )
    .await
    .map_err(|e| {
        if skillswap_db::is_unique_violation(&e, "uq_profiles_username") {
            AppError::Core(CoreError::Conflict("Username is already taken".into()))
        } else if skillswap_db::is_unique_violation(&e, "uq_profiles_email") {
            AppError::Core(CoreError::Conflict("Email is already registered".into()))
        } else {
            AppError::Database(e)
        }
    })?;

    tracing::info!(user_id = profile.id, username = %profile.username, "User registered");

    let (response, cookies) = create_auth_response(
        &state,
        profile.id,
        &profile.username,
        &profile.email,
        profile.onboarding_completed,
    )
    .await?;

    Ok((StatusCode::CREATED, cookies, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens
/// and sets the session cookies the page gate reads.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = input.email.trim().to_ascii_lowercase();

    let profile = ProfileRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &profile.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    tracing::info!(user_id = profile.id, "User logged in");

    let (response, cookies) = create_auth_response(
        &state,
        profile.id,
        &profile.username,
        &profile.email,
        profile.onboarding_completed,
    )
    .await?;

    Ok((StatusCode::OK, cookies, Json(response)))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<impl IntoResponse> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Token rotation: the presented token is single-use.
    SessionRepo::revoke(&state.pool, session.id).await?;

    let profile = ProfileRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let (response, cookies) = create_auth_response(
        &state,
        profile.id,
        &profile.username,
        &profile.email,
        profile.onboarding_completed,
    )
    .await?;

    Ok((StatusCode::OK, cookies, Json(response)))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user and clear the session
/// cookies. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;

    tracing::info!(user_id = auth_user.user_id, "User logged out");

    let [access, refresh] = clear_cookies();
    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, access), (SET_COOKIE, refresh)]),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type SessionCookies = AppendHeaders<[(axum::http::HeaderName, String); 2]>;

/// Generate access + refresh tokens, persist a session row, and build the
/// response body plus the matching `Set-Cookie` headers.
async fn create_auth_response(
    state: &AppState,
    user_id: DbId,
    username: &str,
    email: &str,
    onboarding_completed: bool,
) -> AppResult<(AuthResponse, SessionCookies)> {
    let access_token = generate_access_token(user_id, email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;
    let refresh_max_age = state.config.jwt.refresh_token_expiry_days * 86_400;

    let cookies = AppendHeaders([
        (SET_COOKIE, access_cookie(&access_token, expires_in)),
        (SET_COOKIE, refresh_cookie(&refresh_plaintext, refresh_max_age)),
    ]);

    let response = AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: UserInfo {
            id: user_id,
            username: username.to_string(),
            email: email.to_string(),
            onboarding_completed,
        },
    };

    Ok((response, cookies))
}
