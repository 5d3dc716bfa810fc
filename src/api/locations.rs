use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, auth};
use crate::models::Location;

#[derive(Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct RenameLocationRequest {
    pub name: String,
}

/// GET /locations
pub async fn list_locations(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<Location>>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let locations = state.locations().list(user_id).await?;
    Ok(Json(ApiResponse::success(locations)))
}

/// POST /locations
pub async fn create_location(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<Json<ApiResponse<Location>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let location = state.locations().create(user_id, &payload.name).await?;
    Ok(Json(ApiResponse::success(location)))
}

/// PUT /locations/{id}
pub async fn rename_location(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<RenameLocationRequest>,
) -> Result<Json<ApiResponse<Location>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let location = state.locations().rename(user_id, id, &payload.name).await?;
    Ok(Json(ApiResponse::success(location)))
}
