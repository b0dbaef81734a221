//! Feed composition service.
//!
//! Builds a user's recommendation page: open posts ranked by popularity,
//! biased toward the categories of the user's recent likes, backfilled
//! with globally popular posts to reach the requested size. The backfill
//! query is explicitly sequenced after the primary query; nothing else
//! about the two calls is ordered.
//!
//! Concurrent requests for the same user share one in-flight computation
//! (a per-user `OnceCell` slot) so a burst of page loads does not issue
//! duplicate query triples. Failures degrade to an empty page: the feed
//! is decoration, not a dependency.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use skillswap_core::feed::{dedup_categories, merge_ranked};
use skillswap_core::types::DbId;
use skillswap_db::models::post::Post;
use skillswap_db::repositories::{LikeRepo, PostRepo};
use skillswap_db::DbPool;
use tokio::sync::OnceCell;

/// How many recent likes feed the category-affinity signal.
const AFFINITY_LIKE_WINDOW: i64 = 20;

/// Composes recommendation pages with per-user single-flight.
#[derive(Debug, Default)]
pub struct FeedService {
    inflight: Mutex<HashMap<DbId, Arc<OnceCell<Vec<Post>>>>>,
}

impl FeedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's recommendation page, at most `limit` posts.
    ///
    /// Never fails: any error along the way is logged and the page comes
    /// back empty.
    pub async fn recommendations(&self, pool: &DbPool, user_id: DbId, limit: i64) -> Vec<Post> {
        if limit <= 0 {
            return Vec::new();
        }

        let cell = {
            let mut inflight = self.inflight.lock().expect("feed in-flight map poisoned");
            Arc::clone(inflight.entry(user_id).or_default())
        };

        let posts = cell
            .get_or_init(|| async {
                match self.compose(pool, user_id, limit).await {
                    Ok(posts) => posts,
                    Err(e) => {
                        tracing::error!(error = %e, user_id, "Feed composition failed");
                        Vec::new()
                    }
                }
            })
            .await
            .clone();

        // The slot only guards the in-flight window; the next request
        // recomputes so the page stays fresh.
        self.inflight
            .lock()
            .expect("feed in-flight map poisoned")
            .remove(&user_id);

        posts
    }

    /// One composition pass: affinity signal, primary query, backfill.
    async fn compose(
        &self,
        pool: &DbPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let liked_categories = dedup_categories(
            LikeRepo::recent_category_ids(pool, user_id, AFFINITY_LIKE_WINDOW).await?,
        );

        let primary = if liked_categories.is_empty() {
            Vec::new()
        } else {
            PostRepo::recommend_in_categories(pool, user_id, &liked_categories, limit).await?
        };

        let gap = limit - primary.len() as i64;
        let backfill = if gap > 0 {
            let exclude: Vec<DbId> = primary.iter().map(|p| p.id).collect();
            PostRepo::recommend_backfill(pool, user_id, &exclude, gap).await?
        } else {
            Vec::new()
        };

        tracing::debug!(
            user_id,
            categories = liked_categories.len(),
            primary = primary.len(),
            backfill = backfill.len(),
            "Composed recommendation feed"
        );

        Ok(merge_ranked(primary, backfill, limit as usize, |p| p.id))
    }
}
