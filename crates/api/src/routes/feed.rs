//! Route definitions for the `/feed` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::feed;
use crate::state::AppState;

/// Routes mounted at `/feed`.
pub fn router() -> Router<AppState> {
    Router::new().route("/recommendations", get(feed::recommendations))
}
