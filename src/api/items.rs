use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, FoodstuffDto, auth};
use crate::domain::ItemId;
use crate::services::{
    BatchOutcome, ItemUpdate, NewItem, RefillCandidate, RefillOutcome,
};

#[derive(Deserialize)]
pub struct IdListRequest {
    pub ids: Vec<ItemId>,
}

/// Restock submission. The page's rows arrive either as structured
/// candidates or as the legacy parallel lists (`all_ids[i]` paired with
/// `expirations[i]`); `refill_ids` is always just the checked-off subset.
#[derive(Deserialize)]
pub struct RestockRequest {
    #[serde(default)]
    pub refill_ids: Vec<ItemId>,

    pub candidates: Option<Vec<RefillCandidate>>,

    #[serde(default)]
    pub all_ids: Vec<i32>,

    #[serde(default)]
    pub expirations: Vec<String>,

    /// Shopping-list rows the user deleted outright instead of restocking.
    #[serde(default)]
    pub remove_ids: Vec<ItemId>,
}

#[derive(serde::Serialize)]
pub struct RestockResponse {
    #[serde(flatten)]
    pub outcome: RefillOutcome,
    pub removed: Vec<ItemId>,
}

/// POST /items
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<NewItem>,
) -> Result<Json<ApiResponse<FoodstuffDto>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let offset_hours = state.display_offset_for(user_id).await?;

    let created = state.pantry().add_item(user_id, payload).await?;
    Ok(Json(ApiResponse::success(FoodstuffDto::from_model(
        created,
        offset_hours,
    ))))
}

/// GET /items/{id}
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<FoodstuffDto>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let offset_hours = state.display_offset_for(user_id).await?;

    let item = state.pantry().get_item(user_id, ItemId::new(id)).await?;
    Ok(Json(ApiResponse::success(FoodstuffDto::from_model(
        item,
        offset_hours,
    ))))
}

/// PUT /items/{id}
/// Partial edit; omitted fields are left alone.
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<ItemUpdate>,
) -> Result<Json<ApiResponse<FoodstuffDto>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let offset_hours = state.display_offset_for(user_id).await?;

    let updated = state
        .pantry()
        .update_item(user_id, ItemId::new(id), payload)
        .await?;
    Ok(Json(ApiResponse::success(FoodstuffDto::from_model(
        updated,
        offset_hours,
    ))))
}

/// GET /shopping-list
pub async fn get_shopping_list(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<FoodstuffDto>>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let offset_hours = state.display_offset_for(user_id).await?;

    let items = state.pantry().get_shopping_list(user_id).await?;
    let dtos = items
        .into_iter()
        .map(|item| FoodstuffDto::from_model(item, offset_hours))
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

/// POST /items/out-of-stock
/// Bulk "we're out of this" action from the pantry page.
pub async fn mark_out_of_stock(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<IdListRequest>,
) -> Result<Json<ApiResponse<BatchOutcome>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let outcome = state
        .pantry()
        .mark_out_of_stock(user_id, &payload.ids)
        .await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// POST /items/shopping-list
/// Bulk "needs repurchase" action.
pub async fn mark_for_shopping(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<IdListRequest>,
) -> Result<Json<ApiResponse<BatchOutcome>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let outcome = state
        .pantry()
        .mark_for_shopping(user_id, &payload.ids)
        .await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// POST /items/return-to-pantry
/// History-page action: back in stock without stamping a new purchase.
pub async fn return_to_pantry(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<IdListRequest>,
) -> Result<Json<ApiResponse<BatchOutcome>>, ApiError> {
    let user_id = auth::current_user(&session).await?;
    let outcome = state
        .pantry()
        .return_to_pantry(user_id, &payload.ids)
        .await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// POST /items/restock
pub async fn restock(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RestockRequest>,
) -> Result<Json<ApiResponse<RestockResponse>>, ApiError> {
    let user_id = auth::current_user(&session).await?;

    let candidates = match payload.candidates {
        Some(candidates) => candidates,
        None => RefillCandidate::from_parallel(&payload.all_ids, &payload.expirations)?,
    };

    let outcome = state
        .pantry()
        .refill(user_id, &payload.refill_ids, &candidates)
        .await?;

    let removed = if payload.remove_ids.is_empty() {
        Vec::new()
    } else {
        state
            .pantry()
            .remove_from_shopping_list(user_id, &payload.remove_ids)
            .await?
            .updated
    };

    Ok(Json(ApiResponse::success(RestockResponse {
        outcome,
        removed,
    })))
}
