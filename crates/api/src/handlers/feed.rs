//! Handler for the recommendation feed.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default recommendation page size.
const DEFAULT_LIMIT: i64 = 10;

/// Maximum recommendation page size.
const MAX_LIMIT: i64 = 50;

/// Query parameters for `GET /feed/recommendations`.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/feed/recommendations
///
/// The user's recommendation page. Degrades to an empty list on backend
/// trouble rather than failing the page.
pub async fn recommendations(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FeedQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(0, MAX_LIMIT);

    let posts = state
        .feed
        .recommendations(&state.pool, auth.user_id, limit)
        .await;

    Ok(Json(DataResponse { data: posts }))
}
