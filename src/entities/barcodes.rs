use sea_orm::entity::prelude::*;

/// Barcode reference table. Foodstuffs may point here, but nothing in the
/// lifecycle engine reads it yet.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "barcodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub food_type: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::foodstuffs::Entity")]
    Foodstuffs,
}

impl Related<super::foodstuffs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Foodstuffs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
