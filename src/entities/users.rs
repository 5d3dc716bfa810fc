use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    /// Hours added to UTC when rendering timestamps for this user.
    /// Captured at registration; see the pantry config for the fallback.
    pub utc_offset_hours: i32,

    pub created_at: DateTimeUtc,

    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::locations::Entity")]
    Locations,
    #[sea_orm(has_many = "super::foodstuffs::Entity")]
    Foodstuffs,
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locations.def()
    }
}

impl Related<super::foodstuffs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Foodstuffs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
