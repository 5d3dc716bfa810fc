//! `SeaORM` implementation of the `PantryService` trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tracing::info;

use crate::constants::limits;
use crate::db::{RefillWrite, Store};
use crate::domain::ItemId;
use crate::domain::clock::Clock;
use crate::models::{Foodstuff, FoodstuffChanges, NewFoodstuff};
use crate::services::expiration;
use crate::services::pantry_service::{
    BatchOutcome, ExpiringItem, ItemUpdate, LocationGroup, MalformedOverride, NewItem, PantryEntry,
    PantryError, PantryService, RefillCandidate, RefillOutcome, parse_override,
};

pub struct SeaOrmPantryService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl SeaOrmPantryService {
    #[must_use]
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn validate_name(name: &str) -> Result<(), PantryError> {
        if name.trim().is_empty() {
            return Err(PantryError::Validation("Item name is required".to_string()));
        }
        if name.len() > limits::MAX_ITEM_NAME_LEN {
            return Err(PantryError::Validation(format!(
                "Item name exceeds {} characters",
                limits::MAX_ITEM_NAME_LEN
            )));
        }
        Ok(())
    }

    fn validate_shelf_life(days: i32) -> Result<(), PantryError> {
        if days < 0 {
            return Err(PantryError::Validation(
                "Shelf life must be a non-negative number of days".to_string(),
            ));
        }
        Ok(())
    }

    fn raw_ids(ids: &[ItemId]) -> Vec<i32> {
        ids.iter().map(|id| id.value()).collect()
    }

    fn batch_outcome(rows: crate::db::BatchRows) -> BatchOutcome {
        BatchOutcome {
            updated: rows.updated.into_iter().map(ItemId::new).collect(),
            missing: rows.missing.into_iter().map(ItemId::new).collect(),
        }
    }
}

#[async_trait]
impl PantryService for SeaOrmPantryService {
    async fn add_item(&self, user_id: i32, item: NewItem) -> Result<Foodstuff, PantryError> {
        Self::validate_name(&item.name)?;
        if let Some(days) = item.expires_after_days {
            Self::validate_shelf_life(days)?;
        }
        if let Some(description) = &item.description
            && description.len() > limits::MAX_DESCRIPTION_LEN
        {
            return Err(PantryError::Validation(format!(
                "Description exceeds {} characters",
                limits::MAX_DESCRIPTION_LEN
            )));
        }

        let new = NewFoodstuff {
            user_id,
            location_id: item.location_id,
            name: item.name,
            in_pantry: item.in_pantry,
            on_shopping_list: item.on_shopping_list,
            expires_after_days: item.expires_after_days,
            description: item.description,
        };

        let created = self.store.insert_foodstuff(&new, self.clock.now()).await?;
        info!("Added item '{}' for user {}", created.name, user_id);
        Ok(created)
    }

    async fn get_item(&self, user_id: i32, item_id: ItemId) -> Result<Foodstuff, PantryError> {
        self.store
            .get_foodstuff(user_id, item_id.value())
            .await?
            .ok_or(PantryError::ItemNotFound(item_id))
    }

    async fn update_item(
        &self,
        user_id: i32,
        item_id: ItemId,
        update: ItemUpdate,
    ) -> Result<Foodstuff, PantryError> {
        if let Some(name) = &update.name {
            Self::validate_name(name)?;
        }
        if let Some(days) = update.expires_after_days {
            Self::validate_shelf_life(days)?;
        }

        // A bare calendar date is pinned to noon UTC so the day it names
        // survives every display offset in use.
        let last_purchased = update.purchase_date.map(|date| {
            Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
                + chrono::Duration::hours(12)
        });

        let changes = FoodstuffChanges {
            name: update.name,
            location_id: update.location_id,
            in_pantry: update.in_pantry,
            on_shopping_list: update.on_shopping_list,
            last_purchased,
            expires_after_days: update.expires_after_days,
            description: update.description,
        };

        self.store
            .update_foodstuff(user_id, item_id.value(), &changes)
            .await?
            .ok_or(PantryError::ItemNotFound(item_id))
    }

    async fn get_expiring_items(
        &self,
        user_id: i32,
        offset_hours: i32,
    ) -> Result<Vec<ExpiringItem>, PantryError> {
        let now = self.clock.now();
        let candidates = self.store.expiring_candidates(user_id).await?;

        let mut report: Vec<ExpiringItem> = candidates
            .into_iter()
            .filter_map(|item| {
                let shelf_life = item.expires_after_days?;
                Some(ExpiringItem {
                    item_id: ItemId::new(item.id),
                    name: item.name,
                    location_name: item.location_name,
                    days_remaining: expiration::days_remaining(
                        item.last_purchased,
                        shelf_life,
                        offset_hours,
                        now,
                    ),
                })
            })
            .collect();

        // Stable: ties keep the fetch (insertion) order.
        report.sort_by_key(|item| item.days_remaining);

        Ok(report)
    }

    async fn group_pantry_by_location(
        &self,
        user_id: i32,
    ) -> Result<Vec<LocationGroup>, PantryError> {
        let locations = self.store.locations_for_user(user_id).await?;
        let items = self.store.pantry_items(user_id).await?;

        let mut by_location: HashMap<i32, Vec<PantryEntry>> = HashMap::new();
        for item in items {
            let Some(location_id) = item.location_id else {
                continue;
            };
            by_location.entry(location_id).or_default().push(PantryEntry {
                item_id: ItemId::new(item.id),
                name: item.name,
            });
        }

        Ok(locations
            .into_iter()
            .map(|location| {
                let items = by_location.remove(&location.id).unwrap_or_default();
                LocationGroup { location, items }
            })
            .collect())
    }

    async fn get_shopping_list(&self, user_id: i32) -> Result<Vec<Foodstuff>, PantryError> {
        Ok(self.store.shopping_list(user_id).await?)
    }

    async fn get_history(&self, user_id: i32) -> Result<Vec<Foodstuff>, PantryError> {
        Ok(self.store.out_of_stock_items(user_id).await?)
    }

    async fn mark_out_of_stock(
        &self,
        user_id: i32,
        ids: &[ItemId],
    ) -> Result<BatchOutcome, PantryError> {
        let rows = self
            .store
            .set_foodstuffs_in_pantry(user_id, &Self::raw_ids(ids), false)
            .await?;
        Ok(Self::batch_outcome(rows))
    }

    async fn mark_for_shopping(
        &self,
        user_id: i32,
        ids: &[ItemId],
    ) -> Result<BatchOutcome, PantryError> {
        let rows = self
            .store
            .set_foodstuffs_on_shopping_list(user_id, &Self::raw_ids(ids), true)
            .await?;
        Ok(Self::batch_outcome(rows))
    }

    async fn return_to_pantry(
        &self,
        user_id: i32,
        ids: &[ItemId],
    ) -> Result<BatchOutcome, PantryError> {
        let rows = self
            .store
            .set_foodstuffs_in_pantry(user_id, &Self::raw_ids(ids), true)
            .await?;
        Ok(Self::batch_outcome(rows))
    }

    async fn remove_from_shopping_list(
        &self,
        user_id: i32,
        ids: &[ItemId],
    ) -> Result<BatchOutcome, PantryError> {
        let rows = self
            .store
            .set_foodstuffs_on_shopping_list(user_id, &Self::raw_ids(ids), false)
            .await?;
        Ok(Self::batch_outcome(rows))
    }

    async fn refill(
        &self,
        user_id: i32,
        refill_ids: &[ItemId],
        candidates: &[RefillCandidate],
    ) -> Result<RefillOutcome, PantryError> {
        let overrides: HashMap<ItemId, Option<&str>> = candidates
            .iter()
            .map(|c| (c.item_id, c.expiration_override.as_deref()))
            .collect();

        let mut writes = Vec::with_capacity(refill_ids.len());
        let mut malformed = Vec::new();

        for &item_id in refill_ids {
            let raw = overrides.get(&item_id).copied().flatten();
            match parse_override(raw) {
                Ok(resolved) => writes.push(RefillWrite {
                    id: item_id.value(),
                    expires_after_days: resolved,
                }),
                Err(value) => malformed.push(MalformedOverride { item_id, value }),
            }
        }

        let rows = self
            .store
            .refill_foodstuffs(user_id, &writes, self.clock.now())
            .await?;

        info!(
            "Restocked {} items for user {} ({} unknown, {} malformed overrides)",
            rows.updated.len(),
            user_id,
            rows.missing.len(),
            malformed.len()
        );

        Ok(RefillOutcome {
            refilled: rows.updated.into_iter().map(ItemId::new).collect(),
            missing: rows.missing.into_iter().map(ItemId::new).collect(),
            malformed,
        })
    }
}
