//! Repository for the `blocks` table.

use skillswap_core::types::DbId;
use sqlx::PgPool;

/// Provides block/unblock operations. Feed queries consume the table
/// directly via an anti-join.
pub struct BlockRepo;

impl BlockRepo {
    /// Record a block. A repeated block violates
    /// `uq_blocks_blocker_blocked` and bubbles up for the handler.
    pub async fn block(pool: &PgPool, blocker_id: DbId, blocked_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO blocks (blocker_id, blocked_id) VALUES ($1, $2)")
            .bind(blocker_id)
            .bind(blocked_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Remove a block. Returns `true` when one existed.
    pub async fn unblock(
        pool: &PgPool,
        blocker_id: DbId,
        blocked_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blocks WHERE blocker_id = $1 AND blocked_id = $2")
            .bind(blocker_id)
            .bind(blocked_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
