//! `SeaORM` entities, one per collection.

pub mod prelude;

pub mod accounting_entries;
pub mod audit_log;
pub mod chart_of_accounts;
pub mod company_config;
pub mod entry_lines;
pub mod sea_orm_active_enums;
