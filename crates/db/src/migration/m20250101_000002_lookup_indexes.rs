//! Lookup indexes for concept search, creation order, account type, and
//! per-entry account lines.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INDEXES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
DROP INDEX IF EXISTS idx_entry_lines_entry_account;
DROP INDEX IF EXISTS idx_chart_of_accounts_account_type;
DROP INDEX IF EXISTS idx_accounting_entries_created_at;
DROP INDEX IF EXISTS idx_accounting_entries_concept;
",
        )
        .await?;
        Ok(())
    }
}

const INDEXES_SQL: &str = r"
CREATE INDEX idx_accounting_entries_concept ON accounting_entries(concept);
CREATE INDEX idx_accounting_entries_created_at ON accounting_entries(created_at);
CREATE INDEX idx_chart_of_accounts_account_type ON chart_of_accounts(account_type);
CREATE INDEX idx_entry_lines_entry_account ON entry_lines(entry_id, account_code);
";
