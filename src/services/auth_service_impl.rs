//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;
use tracing::info;

use crate::config::SecurityConfig;
use crate::constants::limits;
use crate::db::{NewUser, Store, hash_password};
use crate::domain::clock::Clock;
use crate::services::auth_service::{AuthError, AuthService, Registration, UserInfo};

pub struct SeaOrmAuthService {
    store: Store,
    clock: Arc<dyn Clock>,
    security: SecurityConfig,
    default_locations: Vec<String>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(
        store: Store,
        clock: Arc<dyn Clock>,
        security: SecurityConfig,
        default_locations: Vec<String>,
    ) -> Self {
        Self {
            store,
            clock,
            security,
            default_locations,
        }
    }

    fn user_info(user: crate::db::User) -> UserInfo {
        UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            utc_offset_hours: user.utc_offset_hours,
            created_at: user.created_at.to_rfc3339(),
        }
    }

    fn validate(registration: &Registration) -> Result<(), AuthError> {
        if registration.username.trim().is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        if registration.email.trim().is_empty() || !registration.email.contains('@') {
            return Err(AuthError::Validation(
                "A valid email address is required".to_string(),
            ));
        }
        if registration.password.len() < limits::MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                limits::MIN_PASSWORD_LEN
            )));
        }
        if !(-23..=23).contains(&registration.utc_offset_hours) {
            return Err(AuthError::Validation(
                "UTC offset must be between -23 and 23 hours".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<UserInfo, AuthError> {
        Self::validate(&registration)?;

        if self
            .store
            .get_user_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameTaken(registration.username));
        }

        let password = registration.password.clone();
        let security = self.security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&security)))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task panicked: {e}")))??;

        let new_user = NewUser {
            username: registration.username,
            email: registration.email,
            password_hash,
            first_name: registration.first_name,
            last_name: registration.last_name,
            utc_offset_hours: registration.utc_offset_hours,
        };

        let user = self.store.create_user(&new_user, self.clock.now()).await?;

        for name in &self.default_locations {
            self.store.create_location(user.id, name).await?;
        }

        info!(
            "Registered user '{}' with {} default locations",
            user.username,
            self.default_locations.len()
        );

        Ok(Self::user_info(user))
    }

    async fn login(&self, username: &str, password: &str) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Self::user_info(user))
    }

    async fn get_user(&self, user_id: i32) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .get_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(Self::user_info(user))
    }
}
