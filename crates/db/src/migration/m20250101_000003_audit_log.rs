//! Append-only audit log.
//!
//! `entry_id` has no foreign key: records outlive the entries they describe.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(AUDIT_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS audit_log;")
            .await?;
        Ok(())
    }
}

const AUDIT_SQL: &str = r"
CREATE TABLE audit_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    action TEXT NOT NULL
        CHECK (action IN ('create_entry', 'delete_entry', 'config_change', 'init', 'system')),
    entry_id INTEGER,
    timestamp TEXT NOT NULL,
    details TEXT NOT NULL
);

CREATE INDEX idx_audit_log_timestamp ON audit_log(timestamp);
CREATE INDEX idx_audit_log_action ON audit_log(action);
CREATE INDEX idx_audit_log_entry_id ON audit_log(entry_id);
";
