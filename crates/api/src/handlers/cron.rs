//! Trigger endpoint for the externally-scheduled post-expiry batch.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use skillswap_core::error::CoreError;

use crate::background::post_expiry;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Header carrying the scheduler's shared secret.
const CRON_SECRET_HEADER: &str = "x-cron-secret";

/// POST /api/v1/cron/close-expired
///
/// Close every open post whose deadline has passed. Authenticated by the
/// `x-cron-secret` header; safe to re-run (the batch is idempotent).
/// Returns the number of posts closed.
pub async fn close_expired(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let Some(expected) = state.config.cron_secret.as_deref() else {
        // No secret configured means nobody is authorized.
        return Err(AppError::Core(CoreError::Unauthorized(
            "Cron trigger is not configured".into(),
        )));
    };

    let provided = headers
        .get(CRON_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if provided != expected {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid cron secret".into(),
        )));
    }

    let closed = post_expiry::run_once(&state.pool, &state.notifications, Utc::now()).await?;

    tracing::info!(closed, "Cron trigger: expiry batch completed");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "closed": closed }),
    }))
}
