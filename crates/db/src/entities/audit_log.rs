//! `SeaORM` Entity for the audit_log collection.
//!
//! `entry_id` has no foreign key: records outlive the entries they describe.

use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::AuditAction;
use crate::store::SecondaryIndex;

/// Records by timestamp.
pub const BY_TIMESTAMP: SecondaryIndex<Entity> =
    SecondaryIndex::new("idx_audit_log_timestamp", &[Column::Timestamp]);

/// Records by action.
pub const BY_ACTION: SecondaryIndex<Entity> =
    SecondaryIndex::new("idx_audit_log_action", &[Column::Action]);

/// Records by related entry.
pub const BY_ENTRY: SecondaryIndex<Entity> =
    SecondaryIndex::new("idx_audit_log_entry_id", &[Column::EntryId]);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub action: AuditAction,
    pub entry_id: Option<i64>,
    pub timestamp: DateTimeUtc,
    #[sea_orm(column_type = "Text")]
    pub details: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
