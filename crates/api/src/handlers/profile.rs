//! Handlers for the current user's profile and public profile pages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use skillswap_core::error::CoreError;
use skillswap_db::models::profile::{ProfileResponse, UpdateProfile};
use skillswap_db::repositories::{BlockRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: auth.user_id,
            })
        })?;

    Ok(Json(DataResponse {
        data: ProfileResponse::from(profile),
    }))
}

/// PUT /api/v1/users/me
///
/// Update the caller's bio / visibility.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::update(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: auth.user_id,
            })
        })?;

    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(Json(DataResponse {
        data: ProfileResponse::from(profile),
    }))
}

/// POST /api/v1/users/me/complete-onboarding
///
/// Flip the flag the page gate reads. Idempotent; returns 204.
pub async fn complete_onboarding(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let flipped = ProfileRepo::complete_onboarding(&state.pool, auth.user_id).await?;
    if flipped {
        tracing::info!(user_id = auth.user_id, "Onboarding completed");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{username}
///
/// Public profile view. Private profiles answer 404 rather than
/// confirming they exist.
pub async fn public_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_public_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: 0,
            })
        })?;

    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/users/{username}/block
///
/// Block another user. Their posts disappear from the caller's feed.
pub async fn block_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let target = ProfileRepo::find_public_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: 0,
            })
        })?;

    if target.id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot block yourself".into(),
        )));
    }

    BlockRepo::block(&state.pool, auth.user_id, target.id)
        .await
        .map_err(|e| {
            if skillswap_db::is_unique_violation(&e, "uq_blocks_blocker_blocked") {
                AppError::Core(CoreError::Conflict("User is already blocked".into()))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(user_id = auth.user_id, blocked_id = target.id, "User blocked");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/{username}/block
pub async fn unblock_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let target = ProfileRepo::find_public_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: 0,
            })
        })?;

    let removed = BlockRepo::unblock(&state.pool, auth.user_id, target.id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Block",
            id: target.id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
