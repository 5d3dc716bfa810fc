use axum::{Json, extract::State};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, FoodstuffDto, auth};
use crate::services::{ExpiringItem, LocationGroup};

/// GET /pantry
/// The grouped inventory view: every location the user owns, name-ascending,
/// with its in-stock items. Locations with nothing in stock come back with
/// an empty list so the page can still render their section.
pub async fn get_pantry(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<LocationGroup>>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let groups = state.pantry().group_pantry_by_location(user_id).await?;
    Ok(Json(ApiResponse::success(groups)))
}

/// GET /pantry/expiring
/// Soonest-to-expire first; negative day counts are items already past
/// their window.
pub async fn get_expiring(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<ExpiringItem>>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let offset_hours = state.display_offset_for(user_id).await?;

    let report = state
        .pantry()
        .get_expiring_items(user_id, offset_hours)
        .await?;
    Ok(Json(ApiResponse::success(report)))
}

/// GET /history
/// Out-of-stock items, most recently purchased first.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<FoodstuffDto>>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let offset_hours = state.display_offset_for(user_id).await?;

    let items = state.pantry().get_history(user_id).await?;
    let dtos = items
        .into_iter()
        .map(|item| FoodstuffDto::from_model(item, offset_hours))
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}
