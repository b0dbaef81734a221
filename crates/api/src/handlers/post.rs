//! Handlers for the `/posts` resource: CRUD, status transitions, likes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use skillswap_core::error::CoreError;
use skillswap_core::post::{
    self, CLOSED_REASON_MANUAL, STATUS_CANCELLED, STATUS_CLOSED, STATUS_COMPLETED, STATUS_OPEN,
};
use skillswap_core::types::DbId;
use skillswap_db::models::post::{CreatePost, UpdatePost};
use skillswap_db::repositories::{CategoryRepo, LikeRepo, PostRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for post listings.
const MAX_LIMIT: i64 = 100;

/// Default page size for post listings.
const DEFAULT_LIMIT: i64 = 20;

/// Query parameters for `GET /posts`.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub category_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
///
/// The category catalogue for the post forms and explore filters.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/posts
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "body must not be empty".into(),
        )));
    }
    if !post::is_valid_kind(&input.kind) {
        return Err(AppError::Core(CoreError::Validation(
            "kind must be 'teach' or 'learn'".into(),
        )));
    }
    if !CategoryRepo::exists(&state.pool, input.category_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: input.category_id,
        }));
    }

    let created = PostRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        post_id = created.id,
        kind = %created.kind,
        "Post created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/posts
///
/// List open posts, optionally filtered by category.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let posts = PostRepo::list_open(&state.pool, params.category_id, limit, offset).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Post",
                id: post_id,
            })
        })?;

    Ok(Json(DataResponse { data: found }))
}

/// GET /api/v1/posts/mine
pub async fn list_my_posts(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let posts = PostRepo::list_by_author(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// PUT /api/v1/posts/{id}
///
/// Edit a post. Only the author's own post matches.
pub async fn update_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<impl IntoResponse> {
    if let Some(category_id) = input.category_id {
        if !CategoryRepo::exists(&state.pool, category_id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Category",
                id: category_id,
            }));
        }
    }

    let updated = PostRepo::update(&state.pool, post_id, auth.user_id, &input).await?;
    match updated {
        Some(updated) => {
            tracing::info!(user_id = auth.user_id, post_id, "Post updated");
            Ok(Json(DataResponse { data: updated }))
        }
        None => Err(not_yours_or_missing(&state, post_id).await),
    }
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/posts/{id}/close
pub async fn close_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transition(auth, state, post_id, STATUS_CLOSED, Some(CLOSED_REASON_MANUAL)).await
}

/// POST /api/v1/posts/{id}/complete
pub async fn complete_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transition(auth, state, post_id, STATUS_COMPLETED, None).await
}

/// POST /api/v1/posts/{id}/cancel
pub async fn cancel_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transition(auth, state, post_id, STATUS_CANCELLED, None).await
}

/// Shared transition flow: author-only, open posts only.
async fn transition(
    auth: AuthUser,
    state: AppState,
    post_id: DbId,
    to_status: &'static str,
    closed_reason: Option<&'static str>,
) -> AppResult<axum::response::Response> {
    let existing = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Post",
                id: post_id,
            })
        })?;

    if existing.author_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author may change a post's status".into(),
        )));
    }
    if !post::can_transition(&existing.status, to_status) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Cannot move a {} post to {to_status}",
            existing.status
        ))));
    }

    // Conditional update: a concurrent transition loses the race here.
    let updated = PostRepo::transition(&state.pool, post_id, auth.user_id, to_status, closed_reason)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Post is no longer {STATUS_OPEN}"
            )))
        })?;

    tracing::info!(
        user_id = auth.user_id,
        post_id,
        status = to_status,
        "Post status changed"
    );

    Ok(Json(DataResponse { data: updated }).into_response())
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

/// POST /api/v1/posts/{id}/like
pub async fn like_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // The post must exist; liking closed posts is allowed (the signal
    // still feeds category affinity).
    PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Post",
                id: post_id,
            })
        })?;

    LikeRepo::like(&state.pool, auth.user_id, post_id)
        .await
        .map_err(|e| {
            if skillswap_db::is_unique_violation(&e, "uq_likes_user_post") {
                AppError::Core(CoreError::Conflict("You already liked this post".into()))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::debug!(user_id = auth.user_id, post_id, "Post liked");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/posts/{id}/like
pub async fn unlike_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = LikeRepo::unlike(&state.pool, auth.user_id, post_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Like",
            id: post_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Distinguish "post missing" (404) from "not your post" (403) after a
/// conditional update matched nothing.
async fn not_yours_or_missing(state: &AppState, post_id: DbId) -> AppError {
    match PostRepo::find_by_id(&state.pool, post_id).await {
        Ok(Some(_)) => AppError::Core(CoreError::Forbidden(
            "Only the author may edit this post".into(),
        )),
        Ok(None) => AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }),
        Err(e) => AppError::Database(e),
    }
}
