//! Route definitions for the scheduler trigger endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::cron;
use crate::state::AppState;

/// Routes mounted at `/cron`. Authenticated by shared secret, not by
/// user session.
pub fn router() -> Router<AppState> {
    Router::new().route("/close-expired", post(cron::close_expired))
}
