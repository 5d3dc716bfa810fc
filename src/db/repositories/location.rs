use crate::entities::{locations, prelude::*};
use crate::models::Location;
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All of a user's locations, name-ascending. Sorting lives here so that
    /// every view built on top of it shows locations in the same order.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Location>> {
        let rows = Locations::find()
            .filter(locations::Column::UserId.eq(user_id))
            .order_by_asc(locations::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to query locations")?;

        Ok(rows.into_iter().map(Location::from).collect())
    }

    pub async fn get(&self, user_id: i32, id: i32) -> Result<Option<Location>> {
        let row = Locations::find_by_id(id)
            .filter(locations::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query location by id")?;

        Ok(row.map(Location::from))
    }

    /// Exact, case-sensitive name lookup used for the per-user uniqueness
    /// check.
    pub async fn find_by_name(&self, user_id: i32, name: &str) -> Result<Option<Location>> {
        let row = Locations::find()
            .filter(locations::Column::UserId.eq(user_id))
            .filter(locations::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query location by name")?;

        Ok(row.map(Location::from))
    }

    pub async fn insert(&self, user_id: i32, name: &str) -> Result<Location> {
        let active = locations::ActiveModel {
            user_id: Set(user_id),
            name: Set(name.to_string()),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;
        debug!("Created location '{}' for user {}", model.name, user_id);

        Ok(Location::from(model))
    }

    pub async fn rename(&self, user_id: i32, id: i32, new_name: &str) -> Result<Option<Location>> {
        let Some(model) = Locations::find_by_id(id)
            .filter(locations::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let mut active: locations::ActiveModel = model.into();
        active.name = Set(new_name.to_string());
        let updated = active.update(&self.conn).await?;

        Ok(Some(Location::from(updated)))
    }
}
