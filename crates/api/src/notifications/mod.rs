//! Notification delivery: the process-wide cache and the best-effort
//! creation path used by workflow side effects.

pub mod store;

pub use store::{CacheEntry, NotificationCache};

use skillswap_db::models::notification::CreateNotification;
use skillswap_db::repositories::NotificationRepo;
use skillswap_db::DbPool;

/// Create a notification and mirror it into the cache.
///
/// Best-effort: a failure is logged and swallowed so the primary
/// operation it is attached to (an application decision, the expiry
/// batch) never fails on the side channel.
pub async fn notify(pool: &DbPool, cache: &NotificationCache, input: CreateNotification) {
    match NotificationRepo::create(pool, &input).await {
        Ok(n) => {
            cache.add(
                n.user_id,
                CacheEntry {
                    id: n.id,
                    is_read: n.is_read,
                },
            );
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                user_id = input.user_id,
                kind = input.kind,
                "Failed to create notification"
            );
        }
    }
}
