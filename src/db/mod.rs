use crate::models::{Foodstuff, FoodstuffChanges, Location, NewFoodstuff};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::foodstuff::{BatchRows, RefillWrite};
pub use repositories::user::{NewUser, User, hash_password};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn foodstuff_repo(&self) -> repositories::foodstuff::FoodstuffRepository {
        repositories::foodstuff::FoodstuffRepository::new(self.conn.clone())
    }

    // Users

    pub async fn create_user(&self, new: &NewUser, now: DateTime<Utc>) -> Result<User> {
        self.user_repo().create(new, now).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    // Locations

    pub async fn locations_for_user(&self, user_id: i32) -> Result<Vec<Location>> {
        self.location_repo().list_for_user(user_id).await
    }

    pub async fn get_location(&self, user_id: i32, id: i32) -> Result<Option<Location>> {
        self.location_repo().get(user_id, id).await
    }

    pub async fn find_location_by_name(&self, user_id: i32, name: &str) -> Result<Option<Location>> {
        self.location_repo().find_by_name(user_id, name).await
    }

    pub async fn create_location(&self, user_id: i32, name: &str) -> Result<Location> {
        self.location_repo().insert(user_id, name).await
    }

    pub async fn rename_location(
        &self,
        user_id: i32,
        id: i32,
        new_name: &str,
    ) -> Result<Option<Location>> {
        self.location_repo().rename(user_id, id, new_name).await
    }

    // Foodstuffs

    pub async fn insert_foodstuff(
        &self,
        new: &NewFoodstuff,
        now: DateTime<Utc>,
    ) -> Result<Foodstuff> {
        self.foodstuff_repo().insert(new, now).await
    }

    pub async fn get_foodstuff(&self, user_id: i32, id: i32) -> Result<Option<Foodstuff>> {
        self.foodstuff_repo().get(user_id, id).await
    }

    pub async fn expiring_candidates(&self, user_id: i32) -> Result<Vec<Foodstuff>> {
        self.foodstuff_repo().expiring_candidates(user_id).await
    }

    pub async fn shopping_list(&self, user_id: i32) -> Result<Vec<Foodstuff>> {
        self.foodstuff_repo().shopping_list(user_id).await
    }

    pub async fn out_of_stock_items(&self, user_id: i32) -> Result<Vec<Foodstuff>> {
        self.foodstuff_repo().out_of_stock(user_id).await
    }

    pub async fn pantry_items(&self, user_id: i32) -> Result<Vec<Foodstuff>> {
        self.foodstuff_repo().in_pantry(user_id).await
    }

    pub async fn update_foodstuff(
        &self,
        user_id: i32,
        id: i32,
        changes: &FoodstuffChanges,
    ) -> Result<Option<Foodstuff>> {
        self.foodstuff_repo()
            .update_fields(user_id, id, changes)
            .await
    }

    pub async fn set_foodstuffs_in_pantry(
        &self,
        user_id: i32,
        ids: &[i32],
        value: bool,
    ) -> Result<BatchRows> {
        self.foodstuff_repo()
            .set_in_pantry(user_id, ids, value)
            .await
    }

    pub async fn set_foodstuffs_on_shopping_list(
        &self,
        user_id: i32,
        ids: &[i32],
        value: bool,
    ) -> Result<BatchRows> {
        self.foodstuff_repo()
            .set_on_shopping_list(user_id, ids, value)
            .await
    }

    pub async fn refill_foodstuffs(
        &self,
        user_id: i32,
        writes: &[RefillWrite],
        now: DateTime<Utc>,
    ) -> Result<BatchRows> {
        self.foodstuff_repo().refill(user_id, writes, now).await
    }
}
