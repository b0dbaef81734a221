use std::sync::Arc;

use crate::config::ServerConfig;
use crate::feed::FeedService;
use crate::notifications::NotificationCache;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: skillswap_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Process-wide notification cache with derived unread counters.
    pub notifications: Arc<NotificationCache>,
    /// Feed composition service with per-user single-flight.
    pub feed: Arc<FeedService>,
}
