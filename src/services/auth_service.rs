//! Domain service for registration and login.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already registered: {0}")]
    UsernameTaken(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// User info DTO for responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub utc_offset_hours: i32,
    pub created_at: String,
}

/// Registration input. `utc_offset_hours` is the offset the user picked at
/// signup, used for all their local-date displays afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub utc_offset_hours: i32,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account and seeds its default storage locations.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UsernameTaken`] when the username exists and
    /// [`AuthError::Validation`] for weak passwords or malformed fields.
    async fn register(&self, registration: Registration) -> Result<UserInfo, AuthError>;

    /// Verifies credentials and returns the account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on any failure, without
    /// distinguishing unknown users from wrong passwords.
    async fn login(&self, username: &str, password: &str) -> Result<UserInfo, AuthError>;

    /// Fetches account info for an already-authenticated user id.
    async fn get_user(&self, user_id: i32) -> Result<UserInfo, AuthError>;
}
