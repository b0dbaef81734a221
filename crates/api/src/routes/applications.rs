//! Route definitions for the `/applications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::application;
use crate::state::AppState;

/// Routes mounted at `/applications`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mine", get(application::list_mine))
        .route("/{id}/accept", post(application::accept))
        .route("/{id}/reject", post(application::reject))
        .route("/{id}/cancel", post(application::cancel))
}
