//! Handlers for the application workflow: apply, accept, reject, cancel.
//!
//! Transitions are double-checked: the state machine in
//! `skillswap_core::application` validates up front for a precise error,
//! and the repository update is conditional on the expected current
//! status so a concurrent decision cannot be overwritten.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use skillswap_core::application::{
    self, Actor, STATUS_ACCEPTED, STATUS_CANCELLED, STATUS_REJECTED,
};
use skillswap_core::error::CoreError;
use skillswap_core::notification::{
    post_link, KIND_APPLICATION_ACCEPTED, KIND_APPLICATION_RECEIVED, KIND_APPLICATION_REJECTED,
};
use skillswap_core::post::STATUS_OPEN;
use skillswap_core::types::DbId;
use skillswap_db::models::application::{Application, CreateApplication};
use skillswap_db::models::notification::CreateNotification;
use skillswap_db::models::post::Post;
use skillswap_db::repositories::{ApplicationRepo, PostRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::notify;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

/// POST /api/v1/posts/{post_id}/applications
///
/// Apply to a post. One live application per (post, applicant); a
/// duplicate answers 409 with a specific message.
pub async fn apply(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Json(input): Json<CreateApplication>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Post",
                id: post_id,
            })
        })?;

    if post.author_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot apply to your own post".into(),
        )));
    }
    if post.status != STATUS_OPEN {
        return Err(AppError::Core(CoreError::Validation(
            "This post is no longer open".into(),
        )));
    }

    let message = input.message.as_deref().map(str::trim).filter(|m| !m.is_empty());

    let created = ApplicationRepo::create(&state.pool, post_id, auth.user_id, message)
        .await
        .map_err(|e| {
            if skillswap_db::is_unique_violation(&e, "uq_applications_post_applicant_active") {
                AppError::Core(CoreError::Conflict(
                    "You have already applied to this post".into(),
                ))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(
        user_id = auth.user_id,
        post_id,
        application_id = created.id,
        "Application submitted"
    );

    // Best-effort side effect; never fails the application itself.
    notify(
        &state.pool,
        &state.notifications,
        CreateNotification {
            user_id: post.author_id,
            kind: KIND_APPLICATION_RECEIVED,
            title: "New application".to_string(),
            message: format!("Someone applied to your post \"{}\".", post.title),
            link: Some(post_link(post.id)),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// Decisions (post author)
// ---------------------------------------------------------------------------

/// POST /api/v1/applications/{id}/accept
///
/// Author accepts a pending application. The applicant is notified; the
/// follow-on match/conversation flow hangs off this acceptance.
pub async fn accept(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(application_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    decide(auth, state, application_id, STATUS_ACCEPTED).await
}

/// POST /api/v1/applications/{id}/reject
pub async fn reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(application_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    decide(auth, state, application_id, STATUS_REJECTED).await
}

/// Shared accept/reject flow.
async fn decide(
    auth: AuthUser,
    state: AppState,
    application_id: DbId,
    to_status: &'static str,
) -> AppResult<axum::response::Response> {
    let (app, post) = load_application(&state, application_id).await?;

    if application::required_actor(to_status) == Some(Actor::PostAuthor)
        && post.author_id != auth.user_id
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the post author may decide an application".into(),
        )));
    }
    application::validate_transition(&app.status, to_status)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let decided = ApplicationRepo::decide(&state.pool, application_id, to_status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Application is no longer pending".into(),
            ))
        })?;

    tracing::info!(
        user_id = auth.user_id,
        application_id,
        post_id = post.id,
        status = to_status,
        "Application decided"
    );

    let (kind, title, message) = if to_status == STATUS_ACCEPTED {
        (
            KIND_APPLICATION_ACCEPTED,
            "Application accepted",
            format!("Your application to \"{}\" was accepted.", post.title),
        )
    } else {
        (
            KIND_APPLICATION_REJECTED,
            "Application rejected",
            format!("Your application to \"{}\" was rejected.", post.title),
        )
    };

    notify(
        &state.pool,
        &state.notifications,
        CreateNotification {
            user_id: decided.applicant_id,
            kind,
            title: title.to_string(),
            message,
            link: Some(post_link(post.id)),
        },
    )
    .await;

    Ok(Json(DataResponse { data: decided }).into_response())
}

// ---------------------------------------------------------------------------
// Cancel (applicant)
// ---------------------------------------------------------------------------

/// POST /api/v1/applications/{id}/cancel
///
/// Applicant withdraws a pending or accepted application.
pub async fn cancel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(application_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (app, _post) = load_application(&state, application_id).await?;

    if app.applicant_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the applicant may cancel an application".into(),
        )));
    }
    application::validate_transition(&app.status, STATUS_CANCELLED)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let cancelled = ApplicationRepo::cancel(&state.pool, application_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Application can no longer be cancelled".into(),
            ))
        })?;

    tracing::info!(
        user_id = auth.user_id,
        application_id,
        "Application cancelled"
    );

    Ok(Json(DataResponse { data: cancelled }))
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /api/v1/posts/{post_id}/applications
///
/// Author-only review listing for a post.
pub async fn list_for_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Post",
                id: post_id,
            })
        })?;

    if post.author_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the post author may list applications".into(),
        )));
    }

    let applications = ApplicationRepo::list_for_post(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /api/v1/applications/mine
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let applications = ApplicationRepo::list_for_applicant(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: applications }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch an application together with its post.
async fn load_application(
    state: &AppState,
    application_id: DbId,
) -> AppResult<(Application, Post)> {
    let app = ApplicationRepo::find_by_id(&state.pool, application_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Application",
                id: application_id,
            })
        })?;

    let post = PostRepo::find_by_id(&state.pool, app.post_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Post",
                id: app.post_id,
            })
        })?;

    Ok((app, post))
}
