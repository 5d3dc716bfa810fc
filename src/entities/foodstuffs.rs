use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "foodstuffs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    pub location_id: Option<i32>,

    pub name: String,

    /// Physically present; drives the main inventory view.
    pub in_pantry: bool,

    /// Needs repurchase. Independent of `in_pantry`; all four combinations
    /// of the two flags are reachable.
    pub on_shopping_list: bool,

    pub last_purchased: DateTimeUtc,

    /// Immutable after creation.
    pub first_added: DateTimeUtc,

    /// Shelf life in days from `last_purchased`. `None` means the item is
    /// not tracked for expiration.
    pub expires_after_days: Option<i32>,

    pub description: Option<String>,

    pub barcode_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Locations,
    #[sea_orm(
        belongs_to = "super::barcodes::Entity",
        from = "Column::BarcodeId",
        to = "super::barcodes::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Barcodes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locations.def()
    }
}

impl Related<super::barcodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Barcodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
