use crate::entities::{foodstuffs, locations, prelude::*};
use crate::models::{Foodstuff, FoodstuffChanges, NewFoodstuff};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

/// Per-id result of a batch flag update. Ids that resolved to no row (or to
/// a row owned by someone else) land in `missing`; the batch still commits
/// for the rest.
#[derive(Debug, Clone, Default)]
pub struct BatchRows {
    pub updated: Vec<i32>,
    pub missing: Vec<i32>,
}

/// One restock write. `expires_after_days` of `None` means "leave the stored
/// shelf life alone"; `Some` overwrites it.
#[derive(Debug, Clone, Copy)]
pub struct RefillWrite {
    pub id: i32,
    pub expires_after_days: Option<i32>,
}

pub struct FoodstuffRepository {
    conn: DatabaseConnection,
}

impl FoodstuffRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: foodstuffs::Model, location: Option<locations::Model>) -> Foodstuff {
        Foodstuff {
            id: model.id,
            user_id: model.user_id,
            location_id: model.location_id,
            location_name: location.map(|l| l.name),
            name: model.name,
            in_pantry: model.in_pantry,
            on_shopping_list: model.on_shopping_list,
            last_purchased: model.last_purchased,
            first_added: model.first_added,
            expires_after_days: model.expires_after_days,
            description: model.description,
            barcode_id: model.barcode_id,
        }
    }

    pub async fn insert(&self, new: &NewFoodstuff, now: DateTime<Utc>) -> anyhow::Result<Foodstuff> {
        let active = foodstuffs::ActiveModel {
            user_id: Set(new.user_id),
            location_id: Set(new.location_id),
            name: Set(new.name.clone()),
            in_pantry: Set(new.in_pantry),
            on_shopping_list: Set(new.on_shopping_list),
            last_purchased: Set(now),
            first_added: Set(now),
            expires_after_days: Set(new.expires_after_days),
            description: Set(new.description.clone()),
            barcode_id: Set(None),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;

        debug!("Added foodstuff {} for user {}", model.id, model.user_id);

        self.get(model.user_id, model.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Inserted foodstuff {} not found", model.id))
    }

    pub async fn get(&self, user_id: i32, id: i32) -> anyhow::Result<Option<Foodstuff>> {
        let row = Foodstuffs::find_by_id(id)
            .filter(foodstuffs::Column::UserId.eq(user_id))
            .find_also_related(Locations)
            .one(&self.conn)
            .await?;

        Ok(row.map(|(model, location)| Self::map_model(model, location)))
    }

    /// In-pantry items carrying a shelf life, in insertion order. The
    /// expiration calculator sorts these by urgency afterwards, and the
    /// insertion order is what breaks its ties.
    pub async fn expiring_candidates(&self, user_id: i32) -> anyhow::Result<Vec<Foodstuff>> {
        let rows = Foodstuffs::find()
            .filter(foodstuffs::Column::UserId.eq(user_id))
            .filter(foodstuffs::Column::InPantry.eq(true))
            .filter(foodstuffs::Column::ExpiresAfterDays.is_not_null())
            .order_by_asc(foodstuffs::Column::Id)
            .find_also_related(Locations)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, location)| Self::map_model(model, location))
            .collect())
    }

    pub async fn shopping_list(&self, user_id: i32) -> anyhow::Result<Vec<Foodstuff>> {
        let rows = Foodstuffs::find()
            .filter(foodstuffs::Column::UserId.eq(user_id))
            .filter(foodstuffs::Column::OnShoppingList.eq(true))
            .order_by_asc(foodstuffs::Column::Name)
            .find_also_related(Locations)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, location)| Self::map_model(model, location))
            .collect())
    }

    /// Out-of-stock items, most recently purchased first.
    pub async fn out_of_stock(&self, user_id: i32) -> anyhow::Result<Vec<Foodstuff>> {
        let rows = Foodstuffs::find()
            .filter(foodstuffs::Column::UserId.eq(user_id))
            .filter(foodstuffs::Column::InPantry.eq(false))
            .order_by_desc(foodstuffs::Column::LastPurchased)
            .find_also_related(Locations)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, location)| Self::map_model(model, location))
            .collect())
    }

    /// Everything currently in the pantry, name-ascending, for the grouped
    /// inventory view.
    pub async fn in_pantry(&self, user_id: i32) -> anyhow::Result<Vec<Foodstuff>> {
        let rows = Foodstuffs::find()
            .filter(foodstuffs::Column::UserId.eq(user_id))
            .filter(foodstuffs::Column::InPantry.eq(true))
            .order_by_asc(foodstuffs::Column::Name)
            .find_also_related(Locations)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, location)| Self::map_model(model, location))
            .collect())
    }

    pub async fn update_fields(
        &self,
        user_id: i32,
        id: i32,
        changes: &FoodstuffChanges,
    ) -> anyhow::Result<Option<Foodstuff>> {
        let Some(model) = Foodstuffs::find_by_id(id)
            .filter(foodstuffs::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        if !changes.is_empty() {
            let mut active: foodstuffs::ActiveModel = model.into();
            if let Some(name) = &changes.name {
                active.name = Set(name.clone());
            }
            if let Some(location_id) = changes.location_id {
                active.location_id = Set(Some(location_id));
            }
            if let Some(in_pantry) = changes.in_pantry {
                active.in_pantry = Set(in_pantry);
            }
            if let Some(on_shopping_list) = changes.on_shopping_list {
                active.on_shopping_list = Set(on_shopping_list);
            }
            if let Some(last_purchased) = changes.last_purchased {
                active.last_purchased = Set(last_purchased);
            }
            if let Some(days) = changes.expires_after_days {
                active.expires_after_days = Set(Some(days));
            }
            if let Some(description) = &changes.description {
                active.description = Set(Some(description.clone()));
            }
            active.update(&self.conn).await?;
        }

        self.get(user_id, id).await
    }

    pub async fn set_in_pantry(
        &self,
        user_id: i32,
        ids: &[i32],
        value: bool,
    ) -> anyhow::Result<BatchRows> {
        self.set_flag(user_id, ids, foodstuffs::Column::InPantry, value)
            .await
    }

    pub async fn set_on_shopping_list(
        &self,
        user_id: i32,
        ids: &[i32],
        value: bool,
    ) -> anyhow::Result<BatchRows> {
        self.set_flag(user_id, ids, foodstuffs::Column::OnShoppingList, value)
            .await
    }

    /// Flips one boolean flag for each id, all inside a single transaction.
    /// Ids that match no owned row are reported back instead of aborting
    /// the batch.
    async fn set_flag(
        &self,
        user_id: i32,
        ids: &[i32],
        column: foodstuffs::Column,
        value: bool,
    ) -> anyhow::Result<BatchRows> {
        let txn = self.conn.begin().await?;
        let mut outcome = BatchRows::default();

        for &id in ids {
            let result = Foodstuffs::update_many()
                .col_expr(column, Expr::value(value))
                .filter(foodstuffs::Column::Id.eq(id))
                .filter(foodstuffs::Column::UserId.eq(user_id))
                .exec(&txn)
                .await?;

            if result.rows_affected > 0 {
                outcome.updated.push(id);
            } else {
                outcome.missing.push(id);
            }
        }

        txn.commit().await?;
        Ok(outcome)
    }

    /// Applies the restock writes as one atomic unit: pantry flag on,
    /// shopping flag off, purchase time stamped, shelf life overwritten only
    /// where the write carries a value.
    pub async fn refill(
        &self,
        user_id: i32,
        writes: &[RefillWrite],
        now: DateTime<Utc>,
    ) -> anyhow::Result<BatchRows> {
        let txn = self.conn.begin().await?;
        let mut outcome = BatchRows::default();

        for write in writes {
            let mut update = Foodstuffs::update_many()
                .col_expr(foodstuffs::Column::InPantry, Expr::value(true))
                .col_expr(foodstuffs::Column::OnShoppingList, Expr::value(false))
                .col_expr(foodstuffs::Column::LastPurchased, Expr::value(now));

            if let Some(days) = write.expires_after_days {
                update = update.col_expr(foodstuffs::Column::ExpiresAfterDays, Expr::value(days));
            }

            let result = update
                .filter(foodstuffs::Column::Id.eq(write.id))
                .filter(foodstuffs::Column::UserId.eq(user_id))
                .exec(&txn)
                .await?;

            if result.rows_affected > 0 {
                outcome.updated.push(write.id);
            } else {
                outcome.missing.push(write.id);
            }
        }

        txn.commit().await?;

        debug!(
            "Refilled {} foodstuffs for user {} ({} unknown)",
            outcome.updated.len(),
            user_id,
            outcome.missing.len()
        );
        Ok(outcome)
    }
}
