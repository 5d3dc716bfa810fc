use chrono::{DateTime, Utc};
use serde::Serialize;

/// A tracked pantry item, joined with its location name for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Foodstuff {
    pub id: i32,
    pub user_id: i32,
    pub location_id: Option<i32>,
    pub location_name: Option<String>,
    pub name: String,
    pub in_pantry: bool,
    pub on_shopping_list: bool,
    pub last_purchased: DateTime<Utc>,
    pub first_added: DateTime<Utc>,
    pub expires_after_days: Option<i32>,
    pub description: Option<String>,
    pub barcode_id: Option<i32>,
}

/// Input for creating a foodstuff. Timestamps are stamped by the repository
/// from the instant the caller supplies.
#[derive(Debug, Clone)]
pub struct NewFoodstuff {
    pub user_id: i32,
    pub location_id: Option<i32>,
    pub name: String,
    pub in_pantry: bool,
    pub on_shopping_list: bool,
    pub expires_after_days: Option<i32>,
    pub description: Option<String>,
}

/// Partial update for a single foodstuff. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct FoodstuffChanges {
    pub name: Option<String>,
    pub location_id: Option<i32>,
    pub in_pantry: Option<bool>,
    pub on_shopping_list: Option<bool>,
    pub last_purchased: Option<DateTime<Utc>>,
    pub expires_after_days: Option<i32>,
    pub description: Option<String>,
}

impl FoodstuffChanges {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location_id.is_none()
            && self.in_pantry.is_none()
            && self.on_shopping_list.is_none()
            && self.last_purchased.is_none()
            && self.expires_after_days.is_none()
            && self.description.is_none()
    }
}
