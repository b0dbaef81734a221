//! Closing of posts whose deadline has passed.
//!
//! [`run_once`] is the batch itself; it backs both the secret-protected
//! trigger endpoint (external schedulers) and the optional in-process
//! interval loop below. The batch is idempotent, so overlapping triggers
//! are harmless.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use skillswap_core::notification::{post_link, KIND_POST_CLOSED};
use skillswap_core::types::Timestamp;
use skillswap_db::models::notification::CreateNotification;
use skillswap_db::repositories::{PostRepo, SessionRepo};
use skillswap_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::notifications::{notify, NotificationCache};

/// Close all open posts whose deadline precedes `now` and notify each
/// author. Returns the number of posts closed.
///
/// The close commits first; notification creation is best-effort and
/// never rolls it back.
pub async fn run_once(
    pool: &DbPool,
    cache: &NotificationCache,
    now: Timestamp,
) -> Result<u64, sqlx::Error> {
    let closed = PostRepo::close_expired(pool, now).await?;

    for post in &closed {
        notify(
            pool,
            cache,
            CreateNotification {
                user_id: post.author_id,
                kind: KIND_POST_CLOSED,
                title: "Post closed".to_string(),
                message: format!("Your post \"{}\" reached its deadline and was closed.", post.title),
                link: Some(post_link(post.id)),
            },
        )
        .await;
    }

    Ok(closed.len() as u64)
}

/// Run the expiry loop on a fixed interval until `cancel` is triggered.
///
/// A fallback for deployments without an external scheduler hitting the
/// trigger endpoint.
pub async fn run(
    pool: DbPool,
    cache: Arc<NotificationCache>,
    interval_secs: u64,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs, "Post expiry job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Post expiry job stopping");
                break;
            }
            _ = interval.tick() => {
                match run_once(&pool, &cache, Utc::now()).await {
                    Ok(closed) => {
                        if closed > 0 {
                            tracing::info!(closed, "Post expiry: closed posts past deadline");
                        } else {
                            tracing::debug!("Post expiry: nothing to close");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Post expiry: batch failed");
                    }
                }

                // Piggyback: purge dead refresh sessions on the same beat.
                match SessionRepo::cleanup_expired(&pool).await {
                    Ok(purged) if purged > 0 => {
                        tracing::debug!(purged, "Purged expired sessions");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!(error = %e, "Session cleanup failed");
                    }
                }
            }
        }
    }
}
