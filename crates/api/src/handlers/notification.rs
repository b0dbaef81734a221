//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication. Every mutation updates the
//! database first and then applies the same transition to the in-process
//! cache, so the cached unread counter stays consistent with what was
//! committed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use skillswap_core::error::CoreError;
use skillswap_core::types::DbId;
use skillswap_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::CacheEntry;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Maximum page size for notification listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications
///
/// List the authenticated user's notifications, newest first. The first
/// unfiltered page warms the cache window.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);
    let unread_only = params.unread_only.unwrap_or(false);

    let notifications =
        NotificationRepo::list_for_user(&state.pool, auth.user_id, unread_only, limit, offset)
            .await?;

    if offset == 0 && !unread_only {
        state.notifications.replace(
            auth.user_id,
            notifications
                .iter()
                .map(|n| CacheEntry {
                    id: n.id,
                    is_read: n.is_read,
                })
                .collect(),
        );
    }

    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Mark a single notification as read. Returns 204 No Content on
/// success, or 404 if the notification does not belong to the user or is
/// already read.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    state.notifications.mark_read(auth.user_id, notification_id);

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
///
/// Mark all of the authenticated user's notifications as read.
/// Returns the number of notifications that were marked.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;

    state.notifications.mark_all_read(auth.user_id);

    Ok(Json(DataResponse {
        data: serde_json::json!({ "marked_read": count }),
    }))
}

/// GET /api/v1/notifications/unread-count
///
/// Unread count for the badge. Served from the cache when the user's
/// window is warm; a cold cache falls through to the database and warms
/// it.
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = match state.notifications.unread_count(auth.user_id) {
        Some(count) => count as i64,
        None => {
            let recent = NotificationRepo::list_for_user(
                &state.pool,
                auth.user_id,
                false,
                DEFAULT_LIMIT,
                0,
            )
            .await?;
            state.notifications.replace(
                auth.user_id,
                recent
                    .iter()
                    .map(|n| CacheEntry {
                        id: n.id,
                        is_read: n.is_read,
                    })
                    .collect(),
            );
            NotificationRepo::unread_count(&state.pool, auth.user_id).await?
        }
    };

    Ok(Json(DataResponse {
        data: serde_json::json!({ "count": count }),
    }))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = NotificationRepo::delete(&state.pool, notification_id, auth.user_id).await?;

    if deleted.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    state.notifications.remove(auth.user_id, notification_id);

    Ok(StatusCode::NO_CONTENT)
}
