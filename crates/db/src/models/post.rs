//! Post entity model and DTOs.

use serde::{Deserialize, Serialize};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub category_id: DbId,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub status: String,
    pub closed_reason: Option<String>,
    pub likes_count: i32,
    pub deadline_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a post.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub category_id: DbId,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub deadline_at: Option<Timestamp>,
}

/// DTO for updating a post. All fields optional; status changes go
/// through the dedicated transition endpoints.
#[derive(Debug, Deserialize)]
pub struct UpdatePost {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub deadline_at: Option<Timestamp>,
}

/// Minimal projection returned by the expiry batch: just enough to
/// address the author notification.
#[derive(Debug, Clone, FromRow)]
pub struct ExpiredPost {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
}
