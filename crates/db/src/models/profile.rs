//! Profile entity model and DTOs.

use serde::{Deserialize, Serialize};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full profile row from the `profiles` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`ProfileResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub onboarding_completed: bool,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub onboarding_completed: bool,
    pub is_public: bool,
    pub created_at: Timestamp,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            username: p.username,
            email: p.email,
            bio: p.bio,
            onboarding_completed: p.onboarding_completed,
            is_public: p.is_public,
            created_at: p.created_at,
        }
    }
}

/// Public view of another user's profile (no email either).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicProfile {
    pub id: DbId,
    pub username: String,
    pub bio: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a profile. The hash is produced by the API layer.
#[derive(Debug)]
pub struct CreateProfile {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// DTO for updating the caller's own profile. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub is_public: Option<bool>,
}
