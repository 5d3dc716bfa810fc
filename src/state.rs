use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::domain::clock::{Clock, SystemClock};
use crate::services::{
    AuthService, LocationService, PantryService, SeaOrmAuthService, SeaOrmLocationService,
    SeaOrmPantryService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub clock: Arc<dyn Clock>,

    pub pantry_service: Arc<dyn PantryService>,

    pub auth_service: Arc<dyn AuthService>,

    pub location_service: Arc<dyn LocationService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Ok(Self::with_parts(config, store, clock))
    }

    /// Wires the service graph from pre-built parts. Tests use this with a
    /// throwaway store and a pinned clock.
    #[must_use]
    pub fn with_parts(config: Config, store: Store, clock: Arc<dyn Clock>) -> Self {
        let pantry_service =
            Arc::new(SeaOrmPantryService::new(store.clone(), clock.clone())) as Arc<dyn PantryService>;

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            clock.clone(),
            config.security.clone(),
            config.pantry.default_locations.clone(),
        )) as Arc<dyn AuthService>;

        let location_service =
            Arc::new(SeaOrmLocationService::new(store.clone())) as Arc<dyn LocationService>;

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            clock,
            pantry_service,
            auth_service,
            location_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
