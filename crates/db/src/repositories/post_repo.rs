//! Repository for the `posts` table, including the feed queries and the
//! expiry batch.

use skillswap_core::post::{CLOSED_REASON_DEADLINE, STATUS_OPEN};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::post::{CreatePost, ExpiredPost, Post, UpdatePost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, author_id, category_id, kind, title, body, status, \
                       closed_reason, likes_count, deadline_at, created_at, updated_at";

/// Predicate shared by the feed queries: open, not past its deadline,
/// not the viewer's own post, and no block relation in either direction.
const FEED_PREDICATE: &str = "status = 'open' \
     AND (deadline_at IS NULL OR deadline_at > NOW()) \
     AND author_id <> $1 \
     AND NOT EXISTS (\
         SELECT 1 FROM blocks b \
         WHERE (b.blocker_id = $1 AND b.blocked_id = posts.author_id) \
            OR (b.blocker_id = posts.author_id AND b.blocked_id = $1))";

/// Provides CRUD operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreatePost,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (author_id, category_id, kind, title, body, deadline_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(author_id)
            .bind(input.category_id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.deadline_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List open posts newest-first, optionally filtered by category.
    pub async fn list_open(
        pool: &PgPool,
        category_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts \
             WHERE status = 'open' \
               AND ($1::BIGINT IS NULL OR category_id = $1) \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(category_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List a user's own posts newest-first, any status.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts \
             WHERE author_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(author_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a post's editable fields. The `author_id` predicate makes
    /// this a no-op against anyone else's post.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET \
                 category_id = COALESCE($3, category_id), \
                 title = COALESCE($4, title), \
                 body = COALESCE($5, body), \
                 deadline_at = COALESCE($6, deadline_at), \
                 updated_at = NOW() \
             WHERE id = $1 AND author_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(author_id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.deadline_at)
            .fetch_optional(pool)
            .await
    }

    /// Move an open post into a terminal status. Conditional on the post
    /// still being open and owned by `author_id`; returns `None` when
    /// either predicate fails.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
        to_status: &str,
        closed_reason: Option<&str>,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET status = $3, closed_reason = $4, updated_at = NOW() \
             WHERE id = $1 AND author_id = $2 AND status = '{STATUS_OPEN}' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(author_id)
            .bind(to_status)
            .bind(closed_reason)
            .fetch_optional(pool)
            .await
    }

    /// Primary feed query: open, unexpired posts by other users in the
    /// given categories, most-liked first.
    pub async fn recommend_in_categories(
        pool: &PgPool,
        user_id: DbId,
        category_ids: &[DbId],
        limit: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts \
             WHERE {FEED_PREDICATE} \
               AND category_id = ANY($2) \
             ORDER BY likes_count DESC \
             LIMIT $3"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .bind(category_ids)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Backfill feed query: same predicates without the category filter,
    /// excluding ids the primary query already returned.
    pub async fn recommend_backfill(
        pool: &PgPool,
        user_id: DbId,
        exclude_ids: &[DbId],
        limit: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts \
             WHERE {FEED_PREDICATE} \
               AND NOT (id = ANY($2)) \
             ORDER BY likes_count DESC \
             LIMIT $3"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .bind(exclude_ids)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Close every open post whose deadline has passed. Idempotent: posts
    /// already closed are not matched, so a second run at the same instant
    /// returns an empty set.
    pub async fn close_expired(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Vec<ExpiredPost>, sqlx::Error> {
        sqlx::query_as::<_, ExpiredPost>(
            "UPDATE posts \
             SET status = 'closed', closed_reason = $2, updated_at = NOW() \
             WHERE status = 'open' AND deadline_at IS NOT NULL AND deadline_at < $1 \
             RETURNING id, author_id, title",
        )
        .bind(now)
        .bind(CLOSED_REASON_DEADLINE)
        .fetch_all(pool)
        .await
    }
}
