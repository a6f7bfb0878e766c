//! Demo data seeder for Tally development and testing.
//!
//! Initialises the store from configuration, then posts a small quarter of
//! sample entries so every report has something to show. Running it against
//! a store that already holds entries leaves the entries untouched.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::ledger::{CreateEntryInput, EntryFilter, EntryLineInput};
use tally_db::{LedgerRepository, SeedOutcome, Store, initialize};
use tally_shared::AppConfig;

/// Demo postings: (date, concept, debit account, credit account, amount).
const DEMO_ENTRIES: [(&str, &str, &str, &str, Decimal); 8] = [
    ("2024-01-01", "Initial capital", "570", "100", dec!(10000)),
    ("2024-01-02", "Bank deposit", "571", "570", dec!(6000)),
    ("2024-01-10", "Office rent January", "621", "571", dec!(800)),
    ("2024-01-15", "Merchandise purchase on credit", "600", "400", dec!(2500)),
    ("2024-01-25", "Sales January", "570", "700", dec!(4200.50)),
    ("2024-02-05", "Supplier payment", "400", "571", dec!(2500)),
    ("2024-02-10", "Office rent February", "621", "571", dec!(800)),
    ("2024-02-28", "Sale on credit", "430", "700", dec!(1750.25)),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Opening store...");
    let store = Store::open(&config.database)
        .await
        .context("Failed to open store")?;

    println!("Seeding chart of accounts and company profile...");
    match initialize(&store, &config.company).await? {
        SeedOutcome::Seeded { accounts } => println!("  Wrote {accounts} accounts"),
        SeedOutcome::AlreadyInitialized => println!("  Store already initialised, skipping..."),
    }

    println!("Seeding demo entries...");
    seed_entries(&store).await?;

    store.close().await?;
    println!("Seeding complete!");
    Ok(())
}

async fn seed_entries(store: &Store) -> anyhow::Result<()> {
    let ledger = LedgerRepository::new(store.clone());
    if !ledger.list_entries(&EntryFilter::default()).await?.is_empty() {
        println!("  Entries already present, skipping...");
        return Ok(());
    }

    for (date, concept, debit, credit, amount) in DEMO_ENTRIES {
        let input = CreateEntryInput {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d")?,
            concept: concept.to_string(),
            lines: vec![
                EntryLineInput::debit(debit, amount),
                EntryLineInput::credit(credit, amount),
            ],
        };
        let recorded = ledger
            .create_entry(&input)
            .await
            .with_context(|| format!("Failed to post '{concept}'"))?;
        println!("  #{} {concept}", recorded.value.entry.id);
    }
    Ok(())
}
