//! Repository for the `likes` table.
//!
//! Likes carry a denormalized counter on `posts.likes_count`; both sides
//! of that pair are updated in one transaction here so the counter can
//! never drift from the join table.

use skillswap_core::types::DbId;
use sqlx::PgPool;

/// Provides like/unlike operations and the affinity read for the feed.
pub struct LikeRepo;

impl LikeRepo {
    /// Record a like and bump the post's counter.
    ///
    /// A duplicate like violates `uq_likes_user_post` and bubbles up as a
    /// unique violation; the transaction rolls back, leaving the counter
    /// untouched.
    pub async fn like(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("INSERT INTO likes (user_id, post_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE posts SET likes_count = likes_count + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await
    }

    /// Remove a like and decrement the post's counter.
    ///
    /// Returns `true` when a like existed. The counter only moves when a
    /// row was actually deleted, clamped at zero.
    pub async fn unlike(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted > 0 {
            sqlx::query("UPDATE posts SET likes_count = GREATEST(likes_count - 1, 0) WHERE id = $1")
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(deleted > 0)
    }

    /// Category ids of the user's most recent likes, newest first, with
    /// repeats. The feed composer deduplicates; this read just projects.
    pub async fn recent_category_ids(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT p.category_id FROM likes l \
             JOIN posts p ON p.id = l.post_id \
             WHERE l.user_id = $1 \
             ORDER BY l.created_at DESC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
