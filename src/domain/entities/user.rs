//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a registered account.
///
/// Maps to the `users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - username: TEXT NOT NULL UNIQUE
/// - email: TEXT NOT NULL UNIQUE
/// - password_hash: TEXT NOT NULL
/// - full_name: TEXT NOT NULL
/// - avatar: TEXT NULL
/// - bio: TEXT NULL
/// - rating: INTEGER NOT NULL DEFAULT 0
/// - exchange_count: INTEGER NOT NULL DEFAULT 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Surrogate key (counter-assigned in memory, BIGSERIAL in Postgres)
    pub id: i64,

    /// Username (unique)
    pub username: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2 password hash; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Full display name
    pub full_name: String,

    /// URL to the user's avatar image
    pub avatar: Option<String>,

    /// Free-text bio
    pub bio: Option<String>,

    /// Aggregate rating (0 until ratings exist)
    pub rating: i32,

    /// Number of completed exchanges this user participated in
    pub exchange_count: i32,
}

/// Input for creating a user. Server-defaulted fields (id, rating,
/// exchange_count) are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    pub full_name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl UserProfileUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.avatar.is_none() && self.bio.is_none()
    }
}

/// Repository trait for User data access operations.
///
/// Method names are entity-qualified so the `Storage` supertrait can bundle
/// all four repositories without collisions.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by unique username.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Find a user by unique email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Create a new user, assigning its id and zeroed statistics.
    async fn create_user(&self, new: &NewUser) -> Result<User, AppError>;

    /// Merge a partial profile update. Returns `None` if the id is absent.
    async fn update_user_profile(
        &self,
        id: i64,
        update: &UserProfileUpdate,
    ) -> Result<Option<User>, AppError>;
}
