use sea_orm_migration::prelude::*;

mod m20240901_initial;
mod m20241012_location_name_unique;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_initial::Migration),
            Box::new(m20241012_location_name_unique::Migration),
        ]
    }
}
