pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_identity_schema;
mod m20260101_000002_create_locations;
mod m20260101_000003_create_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_identity_schema::Migration),
            Box::new(m20260101_000002_create_locations::Migration),
            Box::new(m20260101_000003_create_sessions::Migration),
        ]
    }
}
