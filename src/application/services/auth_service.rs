//! Authentication Service
//!
//! Registration and credential verification. Passwords are hashed with
//! Argon2id; the session cookie itself is managed at the presentation layer.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::domain::entities::{NewUser, User};
use crate::domain::storage::Storage;
use crate::shared::error::AppError;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user with a freshly hashed password.
    async fn register(&self, registration: Registration) -> Result<User, AuthError>;

    /// Verify username/password credentials.
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Username already exists")]
    UsernameExists,

    #[error("Email already exists")]
    EmailExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::UsernameExists | AuthError::EmailExists => {
                AppError::BadRequest(error.to_string())
            }
            AuthError::InvalidCredentials => AppError::Unauthorized(error.to_string()),
            AuthError::Internal(message) => AppError::Internal(message),
            AuthError::Storage(inner) => inner,
        }
    }
}

/// AuthService implementation over the storage gateway.
pub struct AuthServiceImpl {
    store: Arc<dyn Storage>,
}

impl AuthServiceImpl {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        if self
            .store
            .find_user_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameExists);
        }

        if self
            .store
            .find_user_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailExists);
        }

        let password_hash = self.hash_password(&registration.password)?;

        let new_user = NewUser {
            username: registration.username,
            email: registration.email,
            password_hash,
            full_name: registration.full_name,
            avatar: registration.avatar,
            bio: registration.bio,
        };

        // The pre-checks race against concurrent registrations; the store's
        // unique constraints are the backstop.
        Ok(self.store.create_user(&new_user).await?)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}
