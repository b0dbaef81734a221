//! Repository for the `applications` table.

use skillswap_core::application::{STATUS_ACCEPTED, STATUS_PENDING};
use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::Application;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, post_id, applicant_id, status, message, created_at, updated_at";

/// Provides CRUD and state-transition operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a pending application.
    ///
    /// A second live application for the same (post, applicant) pair
    /// violates `uq_applications_post_applicant_active` and bubbles up as
    /// a unique violation for the handler to classify.
    pub async fn create(
        pool: &PgPool,
        post_id: DbId,
        applicant_id: DbId,
        message: Option<&str>,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications (post_id, applicant_id, message) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(post_id)
            .bind(applicant_id)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a pending application to `accepted` or `rejected`.
    ///
    /// Conditional on the row still being pending: a concurrent decision
    /// or a repeated call matches zero rows and returns `None`.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        to_status: &str,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = '{STATUS_PENDING}' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(to_status)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a pending or accepted application.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET status = 'cancelled', updated_at = NOW() \
             WHERE id = $1 AND status IN ('{STATUS_PENDING}', '{STATUS_ACCEPTED}') \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List applications for a post, oldest first (review order).
    pub async fn list_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications \
             WHERE post_id = $1 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// List a user's own applications, newest first.
    pub async fn list_for_applicant(
        pool: &PgPool,
        applicant_id: DbId,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications \
             WHERE applicant_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(applicant_id)
            .fetch_all(pool)
            .await
    }
}
