use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use time;

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod error;
mod items;
mod locations;
mod observability;
mod pantry;
mod system;
mod types;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn pantry(&self) -> &Arc<dyn crate::services::PantryService> {
        &self.shared.pantry_service
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn crate::services::AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn locations(&self) -> &Arc<dyn crate::services::LocationService> {
        &self.shared.location_service
    }

    /// Display offset for a user: their stored registration offset, or the
    /// configured fallback when the account has vanished mid-session.
    pub async fn display_offset_for(&self, user_id: i32) -> Result<i32, ApiError> {
        let user = self
            .store()
            .get_user_by_id(user_id)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?;

        match user {
            Some(user) => Ok(user.utc_offset_hours),
            None => Ok(self.config().read().await.pantry.display_offset_hours),
        }
    }
}

pub async fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    Ok(Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    }))
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared, prometheus_handle).await
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, secure_cookies, session_ttl_minutes) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
            config.server.session_ttl_minutes,
        )
    };

    let protected_routes = create_protected_router()
        .route_layer(middleware::from_fn(auth::require_session));

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            session_ttl_minutes,
        )));

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .layer(session_layer)
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/pantry", get(pantry::get_pantry))
        .route("/pantry/expiring", get(pantry::get_expiring))
        .route("/history", get(pantry::get_history))
        .route("/shopping-list", get(items::get_shopping_list))
        .route("/items", post(items::add_item))
        .route("/items/{id}", get(items::get_item))
        .route("/items/{id}", put(items::update_item))
        .route("/items/out-of-stock", post(items::mark_out_of_stock))
        .route("/items/shopping-list", post(items::mark_for_shopping))
        .route("/items/return-to-pantry", post(items::return_to_pantry))
        .route("/items/restock", post(items::restock))
        .route("/locations", get(locations::list_locations))
        .route("/locations", post(locations::create_location))
        .route("/locations/{id}", put(locations::rename_location))
        .route("/system/status", get(system::get_status))
        .route("/system/metrics", get(observability::get_metrics))
}
