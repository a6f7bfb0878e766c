//! `SeaORM` Entity for the chart_of_accounts collection.

use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::AccountType;
use crate::store::SecondaryIndex;

/// Accounts by parent code.
pub const BY_PARENT: SecondaryIndex<Entity> =
    SecondaryIndex::new("idx_chart_of_accounts_parent_code", &[Column::ParentCode]);

/// Accounts by type.
pub const BY_TYPE: SecondaryIndex<Entity> =
    SecondaryIndex::new("idx_chart_of_accounts_account_type", &[Column::AccountType]);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chart_of_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub parent_code: String,
    pub account_type: AccountType,
    pub editable: bool,
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
