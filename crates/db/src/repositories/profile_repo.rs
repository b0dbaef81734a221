//! Repository for the `profiles` table.

use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile, PublicProfile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, bio, onboarding_completed, \
                       is_public, created_at, updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    ///
    /// Duplicate usernames/emails bubble up as unique violations on
    /// `uq_profiles_username` / `uq_profiles_email`.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE email = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Public view of a profile by username. Only returns profiles the
    /// owner has left public.
    pub async fn find_public_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<PublicProfile>, sqlx::Error> {
        sqlx::query_as::<_, PublicProfile>(
            "SELECT id, username, bio, created_at FROM profiles \
             WHERE username = $1 AND is_public = true",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// The gate's read: just the onboarding flag.
    pub async fn onboarding_completed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar("SELECT onboarding_completed FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update the caller's own profile fields. Returns the updated row,
    /// or `None` when the profile does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET \
                 bio = COALESCE($2, bio), \
                 is_public = COALESCE($3, is_public), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.bio)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Mark onboarding complete. Returns `true` if the flag flipped.
    pub async fn complete_onboarding(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE profiles SET onboarding_completed = true, updated_at = NOW() \
             WHERE id = $1 AND onboarding_completed = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
