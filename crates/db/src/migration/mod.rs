//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. Step N in the list
//! below produces schema version N; see [`crate::schema`].

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_core_collections;
mod m20250101_000002_lookup_indexes;
mod m20250101_000003_audit_log;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_core_collections::Migration),
            Box::new(m20250101_000002_lookup_indexes::Migration),
            Box::new(m20250101_000003_audit_log::Migration),
        ]
    }
}
