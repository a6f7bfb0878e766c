//! `SeaORM` Entity for the entry_lines collection.
//!
//! Amounts are stored in cents; exactly one side is nonzero.

use sea_orm::entity::prelude::*;

use crate::store::SecondaryIndex;

/// Lines by owning entry.
pub const BY_ENTRY: SecondaryIndex<Entity> =
    SecondaryIndex::new("idx_entry_lines_entry_id", &[Column::EntryId]);

/// Lines by account.
pub const BY_ACCOUNT: SecondaryIndex<Entity> =
    SecondaryIndex::new("idx_entry_lines_account_code", &[Column::AccountCode]);

/// Lines by entry, then account.
pub const BY_ENTRY_ACCOUNT: SecondaryIndex<Entity> = SecondaryIndex::new(
    "idx_entry_lines_entry_account",
    &[Column::EntryId, Column::AccountCode],
);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "entry_lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub entry_id: i64,
    pub account_code: String,
    pub debit_cents: i64,
    pub credit_cents: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounting_entries::Entity",
        from = "Column::EntryId",
        to = "super::accounting_entries::Column::Id"
    )]
    AccountingEntries,
    #[sea_orm(
        belongs_to = "super::chart_of_accounts::Entity",
        from = "Column::AccountCode",
        to = "super::chart_of_accounts::Column::Code"
    )]
    ChartOfAccounts,
}

impl Related<super::accounting_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountingEntries.def()
    }
}

impl Related<super::chart_of_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChartOfAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
