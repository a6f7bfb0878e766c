//! Schema migration runner for Tally.
//!
//! Usage (reads `DATABASE_URL`, e.g. `sqlite://tally.db?mode=rwc`):
//!   migrator up      - Apply all pending schema steps
//!   migrator down    - Revert the last step
//!   migrator status  - Show which steps are applied
//!   migrator fresh   - Drop all tables and re-apply every step
//!
//! The `tally` binary upgrades the schema on its own when it opens a store;
//! this tool is for inspecting or resetting a database by hand.

use sea_orm_migration::prelude::*;
use tally_db::migration::Migrator;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Run the migrator CLI (it sets up its own tracing)
    cli::run_cli(Migrator).await;
}
