pub mod applications;
pub mod auth;
pub mod cron;
pub mod feed;
pub mod health;
pub mod notifications;
pub mod posts;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers::post;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                          category catalogue (GET)
///
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /users/me                            get, update own profile
/// /users/me/complete-onboarding        flip onboarding flag (POST)
/// /users/{username}                    public profile (GET)
/// /users/{username}/block              block, unblock (POST, DELETE)
///
/// /posts                               list, create
/// /posts/mine                          own posts (GET)
/// /posts/{id}                          get, update
/// /posts/{id}/close                    close (POST, author)
/// /posts/{id}/complete                 complete (POST, author)
/// /posts/{id}/cancel                   cancel (POST, author)
/// /posts/{id}/like                     like, unlike (POST, DELETE)
/// /posts/{id}/applications             apply, review list (POST, GET)
///
/// /applications/mine                   own applications (GET)
/// /applications/{id}/accept            accept (POST, author)
/// /applications/{id}/reject            reject (POST, author)
/// /applications/{id}/cancel            cancel (POST, applicant)
///
/// /notifications                       list (GET)
/// /notifications/read-all              mark all read (POST)
/// /notifications/unread-count          badge count (GET)
/// /notifications/{id}/read             mark read (POST)
/// /notifications/{id}                  delete (DELETE)
///
/// /feed/recommendations                recommendation page (GET)
///
/// /cron/close-expired                  expiry trigger (POST, shared secret)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(post::list_categories))
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/posts", posts::router())
        .nest("/applications", applications::router())
        .nest("/notifications", notifications::router())
        .nest("/feed", feed::router())
        .nest("/cron", cron::router())
}
