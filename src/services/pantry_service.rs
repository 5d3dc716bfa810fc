//! Domain service for the pantry lifecycle engine.
//!
//! Covers the three engine surfaces: the expiration calculator, the
//! lifecycle reconciler (batch flag transitions and restocking), and the
//! grouped inventory view. Handlers stay free of persistence types; the
//! service speaks in the DTOs below.

use crate::domain::ItemId;
use crate::models::{Foodstuff, Location};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain errors for pantry operations.
#[derive(Debug, Error)]
pub enum PantryError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Restock lists misaligned: {ids} ids but {overrides} overrides")]
    ListLengthMismatch { ids: usize, overrides: usize },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for PantryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PantryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// One row of the urgency-sorted expiration report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiringItem {
    pub item_id: ItemId,
    pub name: String,
    pub location_name: Option<String>,
    pub days_remaining: i64,
}

/// One item in a grouped pantry view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PantryEntry {
    pub item_id: ItemId,
    pub name: String,
}

/// A location and its in-pantry items. Locations with nothing in stock still
/// appear, with an empty item list.
#[derive(Debug, Clone, Serialize)]
pub struct LocationGroup {
    pub location: Location,
    pub items: Vec<PantryEntry>,
}

/// Per-id result of a flag batch. Unknown ids are reported, not fatal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub updated: Vec<ItemId>,
    pub missing: Vec<ItemId>,
}

/// An override string that did not parse as a non-negative integer. The
/// item it belonged to was left completely untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedOverride {
    pub item_id: ItemId,
    pub value: String,
}

/// Result of a restock call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefillOutcome {
    pub refilled: Vec<ItemId>,
    pub missing: Vec<ItemId>,
    pub malformed: Vec<MalformedOverride>,
}

/// One row of the restock page: the item shown and the optional expiration
/// override the user typed next to it. Correlation is structural, not
/// positional; [`RefillCandidate::from_parallel`] bridges the legacy
/// parallel-list form shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefillCandidate {
    pub item_id: ItemId,
    pub expiration_override: Option<String>,
}

impl RefillCandidate {
    /// Pairs the legacy form lists by index: `overrides[i]` belongs to
    /// `ids[i]`. Fails the whole call when the lists differ in length,
    /// since positional correlation is meaningless then.
    pub fn from_parallel(ids: &[i32], overrides: &[String]) -> Result<Vec<Self>, PantryError> {
        if ids.len() != overrides.len() {
            return Err(PantryError::ListLengthMismatch {
                ids: ids.len(),
                overrides: overrides.len(),
            });
        }

        Ok(ids
            .iter()
            .zip(overrides)
            .map(|(&id, raw)| Self {
                item_id: ItemId::new(id),
                expiration_override: if raw.trim().is_empty() {
                    None
                } else {
                    Some(raw.clone())
                },
            })
            .collect())
    }
}

/// Parses an expiration override. Empty or absent means "keep the stored
/// value" (`Ok(None)`), never "clear it". A non-empty string must be a
/// non-negative integer; anything else comes back as `Err` with the raw
/// input for reporting.
pub(crate) fn parse_override(raw: Option<&str>) -> Result<Option<i32>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<i32>() {
        Ok(days) if days >= 0 => Ok(Some(days)),
        _ => Err(raw.to_string()),
    }
}

/// Input for adding an item. Flags come straight from the add form; absent
/// checkboxes mean false.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub location_id: Option<i32>,
    #[serde(default)]
    pub in_pantry: bool,
    #[serde(default)]
    pub on_shopping_list: bool,
    pub expires_after_days: Option<i32>,
    pub description: Option<String>,
}

/// Partial edit of a single item. Omitted fields stay as they are. A
/// purchase date arrives as a plain calendar date and is pinned to noon UTC
/// so day-level displays stay accurate across offsets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub location_id: Option<i32>,
    pub in_pantry: Option<bool>,
    pub on_shopping_list: Option<bool>,
    pub purchase_date: Option<NaiveDate>,
    pub expires_after_days: Option<i32>,
    pub description: Option<String>,
}

/// Domain service trait for the pantry engine.
///
/// Callers must scope every call with the owning user's id; ids belonging
/// to other users behave exactly like unknown ids.
#[async_trait::async_trait]
pub trait PantryService: Send + Sync {
    /// Creates an item, stamping `last_purchased` and `first_added` to now.
    async fn add_item(&self, user_id: i32, item: NewItem) -> Result<Foodstuff, PantryError>;

    /// Fetches a single item.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::ItemNotFound`] when the id does not resolve
    /// for this user.
    async fn get_item(&self, user_id: i32, item_id: ItemId) -> Result<Foodstuff, PantryError>;

    /// Applies a partial edit to one item.
    async fn update_item(
        &self,
        user_id: i32,
        item_id: ItemId,
        update: ItemUpdate,
    ) -> Result<Foodstuff, PantryError>;

    /// Expiration report: every in-pantry item with a shelf life, soonest
    /// to expire first. `days_remaining` may be negative for items already
    /// past their window. `offset_hours` shifts the computed expiry into
    /// the caller's display timezone; nothing is hardcoded here.
    async fn get_expiring_items(
        &self,
        user_id: i32,
        offset_hours: i32,
    ) -> Result<Vec<ExpiringItem>, PantryError>;

    /// Grouped inventory: locations name-ascending, each with its in-pantry
    /// items name-ascending. Recomputed on every call.
    async fn group_pantry_by_location(
        &self,
        user_id: i32,
    ) -> Result<Vec<LocationGroup>, PantryError>;

    /// Everything currently flagged for repurchase.
    async fn get_shopping_list(&self, user_id: i32) -> Result<Vec<Foodstuff>, PantryError>;

    /// Out-of-stock items, most recently purchased first.
    async fn get_history(&self, user_id: i32) -> Result<Vec<Foodstuff>, PantryError>;

    /// Clears `in_pantry` for each id. Idempotent; unknown ids are reported
    /// in the outcome and do not abort the batch.
    async fn mark_out_of_stock(
        &self,
        user_id: i32,
        ids: &[ItemId],
    ) -> Result<BatchOutcome, PantryError>;

    /// Sets `on_shopping_list` for each id. Same per-id policy.
    async fn mark_for_shopping(
        &self,
        user_id: i32,
        ids: &[ItemId],
    ) -> Result<BatchOutcome, PantryError>;

    /// Puts items back in the pantry WITHOUT touching `last_purchased` or
    /// the shopping flag (the history-page action, distinct from a refill).
    async fn return_to_pantry(
        &self,
        user_id: i32,
        ids: &[ItemId],
    ) -> Result<BatchOutcome, PantryError>;

    /// Takes items off the shopping list without other changes.
    async fn remove_from_shopping_list(
        &self,
        user_id: i32,
        ids: &[ItemId],
    ) -> Result<BatchOutcome, PantryError>;

    /// Restocks the checked-off subset of the shopping page.
    ///
    /// `candidates` describes every row shown on the page with its optional
    /// expiration override; only ids in `refill_ids` are written. A written
    /// item gets `in_pantry = true`, `on_shopping_list = false`, a fresh
    /// `last_purchased`, and its override if one was given — an absent
    /// override keeps the stored shelf life, never clears it. Rows not in
    /// `refill_ids` are untouched regardless of their overrides. All writes
    /// of one call commit atomically.
    async fn refill(
        &self,
        user_id: i32,
        refill_ids: &[ItemId],
        candidates: &[RefillCandidate],
    ) -> Result<RefillOutcome, PantryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pantry_error_display() {
        let err = PantryError::ItemNotFound(ItemId::new(42));
        assert_eq!(err.to_string(), "Item not found: 42");

        let err = PantryError::ListLengthMismatch {
            ids: 4,
            overrides: 3,
        };
        assert_eq!(
            err.to_string(),
            "Restock lists misaligned: 4 ids but 3 overrides"
        );
    }

    #[test]
    fn from_parallel_pairs_by_index() {
        let candidates = RefillCandidate::from_parallel(
            &[1, 2, 3],
            &[String::new(), "20".to_string(), "  ".to_string()],
        )
        .unwrap();

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].item_id, ItemId::new(1));
        assert_eq!(candidates[0].expiration_override, None);
        assert_eq!(candidates[1].expiration_override.as_deref(), Some("20"));
        assert_eq!(candidates[2].expiration_override, None);
    }

    #[test]
    fn from_parallel_rejects_misaligned_lists() {
        let err = RefillCandidate::from_parallel(&[1, 2], &["5".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            PantryError::ListLengthMismatch {
                ids: 2,
                overrides: 1
            }
        ));
    }

    #[test]
    fn parse_override_falls_back_on_empty() {
        assert_eq!(parse_override(None), Ok(None));
        assert_eq!(parse_override(Some("")), Ok(None));
        assert_eq!(parse_override(Some("   ")), Ok(None));
    }

    #[test]
    fn parse_override_accepts_non_negative_integers() {
        assert_eq!(parse_override(Some("0")), Ok(Some(0)));
        assert_eq!(parse_override(Some("14")), Ok(Some(14)));
        assert_eq!(parse_override(Some(" 7 ")), Ok(Some(7)));
    }

    #[test]
    fn parse_override_reports_garbage_verbatim() {
        assert_eq!(parse_override(Some("-3")), Err("-3".to_string()));
        assert_eq!(parse_override(Some("soon")), Err("soon".to_string()));
        assert_eq!(parse_override(Some("1.5")), Err("1.5".to_string()));
    }
}
