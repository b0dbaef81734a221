//! Route definitions for the `/posts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{application, post as post_handlers};
use crate::state::AppState;

/// Routes mounted at `/posts`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(post_handlers::list_posts).post(post_handlers::create_post),
        )
        .route("/mine", get(post_handlers::list_my_posts))
        .route(
            "/{id}",
            get(post_handlers::get_post).put(post_handlers::update_post),
        )
        .route("/{id}/close", post(post_handlers::close_post))
        .route("/{id}/complete", post(post_handlers::complete_post))
        .route("/{id}/cancel", post(post_handlers::cancel_post))
        .route(
            "/{id}/like",
            post(post_handlers::like_post).delete(post_handlers::unlike_post),
        )
        .route(
            "/{post_id}/applications",
            post(application::apply).get(application::list_for_post),
        )
}
