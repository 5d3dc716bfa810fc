//! Domain service for storage locations.

use crate::models::Location;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location not found: {0}")]
    NotFound(i32),

    #[error("A location named '{0}' already exists in this pantry")]
    DuplicateName(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for LocationError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for LocationError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for location management. Names are unique per user
/// with a case-sensitive exact match; creation and rename both enforce it.
#[async_trait::async_trait]
pub trait LocationService: Send + Sync {
    /// All of a user's locations, name-ascending.
    async fn list(&self, user_id: i32) -> Result<Vec<Location>, LocationError>;

    /// Creates a location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::DuplicateName`] when this user already has a
    /// location with exactly this name.
    async fn create(&self, user_id: i32, name: &str) -> Result<Location, LocationError>;

    /// Renames a location, subject to the same uniqueness check.
    async fn rename(
        &self,
        user_id: i32,
        location_id: i32,
        new_name: &str,
    ) -> Result<Location, LocationError>;
}
