//! `SeaORM` Entity for the accounting_entries collection.

use sea_orm::entity::prelude::*;

use crate::store::SecondaryIndex;

/// Entries by accounting date.
pub const BY_DATE: SecondaryIndex<Entity> =
    SecondaryIndex::new("idx_accounting_entries_date", &[Column::Date]);

/// Entries by concept.
pub const BY_CONCEPT: SecondaryIndex<Entity> =
    SecondaryIndex::new("idx_accounting_entries_concept", &[Column::Concept]);

/// Entries by creation time.
pub const BY_CREATED_AT: SecondaryIndex<Entity> =
    SecondaryIndex::new("idx_accounting_entries_created_at", &[Column::CreatedAt]);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounting_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: Date,
    pub concept: String,
    pub total_debit_cents: i64,
    pub total_credit_cents: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::entry_lines::Entity")]
    EntryLines,
}

impl Related<super::entry_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntryLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
