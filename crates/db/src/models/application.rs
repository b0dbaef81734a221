//! Application entity model and DTOs.

use serde::{Deserialize, Serialize};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub post_id: DbId,
    pub applicant_id: DbId,
    pub status: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for applying to a post.
#[derive(Debug, Deserialize)]
pub struct CreateApplication {
    pub message: Option<String>,
}
