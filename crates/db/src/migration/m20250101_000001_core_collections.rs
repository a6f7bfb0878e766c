//! Core collections: company profile, chart of accounts, entries, and lines.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(CORE_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const CORE_SQL: &str = r"
-- Company profile: a single row keyed 1
CREATE TABLE company_config (
    id INTEGER PRIMARY KEY NOT NULL CHECK (id = 1),
    name TEXT NOT NULL,
    phone TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    address TEXT NOT NULL DEFAULT '',
    tax_id TEXT NOT NULL DEFAULT '',
    logo TEXT,
    updated_at TEXT NOT NULL
);

-- Chart of accounts; parent_code is '' for roots
CREATE TABLE chart_of_accounts (
    code TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    parent_code TEXT NOT NULL DEFAULT '',
    account_type TEXT NOT NULL
        CHECK (account_type IN ('asset', 'liability', 'equity', 'expense', 'income')),
    editable INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX idx_chart_of_accounts_parent_code ON chart_of_accounts(parent_code);

-- Entry headers; totals in cents
CREATE TABLE accounting_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    concept TEXT NOT NULL,
    total_debit_cents INTEGER NOT NULL CHECK (total_debit_cents >= 0),
    total_credit_cents INTEGER NOT NULL CHECK (total_credit_cents >= 0),
    created_at TEXT NOT NULL,
    CONSTRAINT chk_entry_balanced CHECK (total_debit_cents = total_credit_cents)
);

CREATE INDEX idx_accounting_entries_date ON accounting_entries(date);

-- Entry lines; exactly one side is nonzero
CREATE TABLE entry_lines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    entry_id INTEGER NOT NULL REFERENCES accounting_entries(id),
    account_code TEXT NOT NULL REFERENCES chart_of_accounts(code),
    debit_cents INTEGER NOT NULL DEFAULT 0 CHECK (debit_cents >= 0),
    credit_cents INTEGER NOT NULL DEFAULT 0 CHECK (credit_cents >= 0),
    CONSTRAINT chk_line_one_side CHECK ((debit_cents > 0) <> (credit_cents > 0))
);

CREATE INDEX idx_entry_lines_entry_id ON entry_lines(entry_id);
CREATE INDEX idx_entry_lines_account_code ON entry_lines(account_code);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS entry_lines;
DROP TABLE IF EXISTS accounting_entries;
DROP TABLE IF EXISTS chart_of_accounts;
DROP TABLE IF EXISTS company_config;
";
