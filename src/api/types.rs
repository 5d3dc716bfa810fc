use serde::Serialize;

use crate::constants::display;
use crate::domain::clock;
use crate::models::Foodstuff;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Full item representation for the API. Raw timestamps stay UTC RFC 3339;
/// `last_purchased_local` is pre-rendered in the owner's display offset the
/// way the pages show it.
#[derive(Debug, Serialize)]
pub struct FoodstuffDto {
    pub id: i32,
    pub name: String,
    pub location_id: Option<i32>,
    pub location_name: Option<String>,
    pub in_pantry: bool,
    pub on_shopping_list: bool,
    pub last_purchased: String,
    pub last_purchased_local: String,
    pub first_added: String,
    pub expires_after_days: Option<i32>,
    pub description: Option<String>,
}

impl FoodstuffDto {
    #[must_use]
    pub fn from_model(item: Foodstuff, offset_hours: i32) -> Self {
        let local = clock::to_local(item.last_purchased, offset_hours);
        Self {
            id: item.id,
            name: item.name,
            location_id: item.location_id,
            location_name: item.location_name,
            in_pantry: item.in_pantry,
            on_shopping_list: item.on_shopping_list,
            last_purchased: item.last_purchased.to_rfc3339(),
            last_purchased_local: local.format(display::PURCHASE_DATE_FORMAT).to_string(),
            first_added: item.first_added.to_rfc3339(),
            expires_after_days: item.expires_after_days,
            description: item.description,
        }
    }
}
