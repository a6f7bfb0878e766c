//! Storage layer for the ledger, on SQLite through `SeaORM`.
//!
//! This crate provides:
//! - `SeaORM` entity definitions, one per collection
//! - Versioned schema migrations and the schema manager
//! - A transactional store adapter with secondary-index range reads
//! - Repositories for entries, accounts, company profile, audit trail, and reports
//! - First-run seeding

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod schema;
pub mod seed;
pub mod store;

pub use repositories::{
    AccountRepository, AuditRepository, CompanyRepository, LedgerRepository, ReportRepository,
};
pub use schema::{SCHEMA_VERSION, SchemaUpgrade};
pub use seed::{SeedOutcome, initialize};
pub use store::{KeyRange, SecondaryIndex, Store, StoreError, StoreTransaction};
