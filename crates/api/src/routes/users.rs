//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(profile::me).put(profile::update_me))
        .route("/me/complete-onboarding", post(profile::complete_onboarding))
        .route("/{username}", get(profile::public_profile))
        .route(
            "/{username}/block",
            post(profile::block_user).delete(profile::unblock_user),
        )
}
