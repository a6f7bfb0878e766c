//! Shared fixtures for storage integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use tally_core::ledger::{CreateEntryInput, EntryLineInput};
use tally_db::{Store, initialize};
use tally_shared::{CompanyDefaults, DatabaseConfig};
use tempfile::TempDir;

/// Database config pointing at a file inside `dir`.
pub fn config_in(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig::sqlite_file(dir.path().join("tally.db"))
}

/// Opens an empty store in a fresh temporary directory.
///
/// The directory must outlive the store.
pub async fn empty_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Store::open(&config_in(&dir))
        .await
        .expect("Failed to open store");
    (dir, store)
}

/// Opens a store seeded with the default company and chart.
pub async fn seeded_store() -> (TempDir, Store) {
    let (dir, store) = empty_store().await;
    initialize(&store, &CompanyDefaults::default())
        .await
        .expect("Failed to seed store");
    (dir, store)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Two-line entry: debit one account, credit another, same amount.
pub fn transfer(
    on: NaiveDate,
    concept: &str,
    debit: &str,
    credit: &str,
    amount: Decimal,
) -> CreateEntryInput {
    CreateEntryInput {
        date: on,
        concept: concept.to_string(),
        lines: vec![
            EntryLineInput::debit(debit, amount),
            EntryLineInput::credit(credit, amount),
        ],
    }
}

/// Installs a trigger that aborts every `event` on `table` with `message`.
pub async fn fail_on(store: &Store, event: &str, table: &str, message: &str) {
    let sql = format!(
        "CREATE TRIGGER fail_{table} BEFORE {event} ON {table} \
         BEGIN SELECT RAISE(ABORT, '{message}'); END;"
    );
    store
        .connection()
        .execute_unprepared(&sql)
        .await
        .expect("Failed to install trigger");
}
