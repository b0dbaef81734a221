//! Repository for the `categories` lookup table.

use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::Category;

/// Read operations for the category catalogue (seeded by migration).
pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name, created_at FROM categories ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> = sqlx::query_scalar("SELECT id FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }
}
