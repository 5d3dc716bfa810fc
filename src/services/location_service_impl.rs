//! `SeaORM` implementation of the `LocationService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::models::Location;
use crate::services::location_service::{LocationError, LocationService};

pub struct SeaOrmLocationService {
    store: Store,
}

impl SeaOrmLocationService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn validate_name(name: &str) -> Result<(), LocationError> {
        if name.trim().is_empty() {
            return Err(LocationError::Validation(
                "Location name is required".to_string(),
            ));
        }
        Ok(())
    }

    async fn ensure_unique(&self, user_id: i32, name: &str) -> Result<(), LocationError> {
        if self.store.find_location_by_name(user_id, name).await?.is_some() {
            return Err(LocationError::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LocationService for SeaOrmLocationService {
    async fn list(&self, user_id: i32) -> Result<Vec<Location>, LocationError> {
        Ok(self.store.locations_for_user(user_id).await?)
    }

    async fn create(&self, user_id: i32, name: &str) -> Result<Location, LocationError> {
        Self::validate_name(name)?;
        self.ensure_unique(user_id, name).await?;

        Ok(self.store.create_location(user_id, name).await?)
    }

    async fn rename(
        &self,
        user_id: i32,
        location_id: i32,
        new_name: &str,
    ) -> Result<Location, LocationError> {
        Self::validate_name(new_name)?;

        let existing = self
            .store
            .get_location(user_id, location_id)
            .await?
            .ok_or(LocationError::NotFound(location_id))?;

        // Renaming a location to its current name is a no-op, not a clash.
        if existing.name != new_name {
            self.ensure_unique(user_id, new_name).await?;
        }

        self.store
            .rename_location(user_id, location_id, new_name)
            .await?
            .ok_or(LocationError::NotFound(location_id))
    }
}
