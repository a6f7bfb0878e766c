//! Enumerations stored as text columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tally_core::ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum AccountType {
    #[sea_orm(string_value = "asset")]
    Asset,
    #[sea_orm(string_value = "liability")]
    Liability,
    #[sea_orm(string_value = "equity")]
    Equity,
    #[sea_orm(string_value = "expense")]
    Expense,
    #[sea_orm(string_value = "income")]
    Income,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum AuditAction {
    #[sea_orm(string_value = "create_entry")]
    CreateEntry,
    #[sea_orm(string_value = "delete_entry")]
    DeleteEntry,
    #[sea_orm(string_value = "config_change")]
    ConfigChange,
    #[sea_orm(string_value = "init")]
    Init,
    #[sea_orm(string_value = "system")]
    System,
}

impl From<ledger::AccountType> for AccountType {
    fn from(value: ledger::AccountType) -> Self {
        match value {
            ledger::AccountType::Asset => Self::Asset,
            ledger::AccountType::Liability => Self::Liability,
            ledger::AccountType::Equity => Self::Equity,
            ledger::AccountType::Expense => Self::Expense,
            ledger::AccountType::Income => Self::Income,
        }
    }
}

impl From<AccountType> for ledger::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Expense => Self::Expense,
            AccountType::Income => Self::Income,
        }
    }
}

impl From<ledger::AuditAction> for AuditAction {
    fn from(value: ledger::AuditAction) -> Self {
        match value {
            ledger::AuditAction::CreateEntry => Self::CreateEntry,
            ledger::AuditAction::DeleteEntry => Self::DeleteEntry,
            ledger::AuditAction::ConfigChange => Self::ConfigChange,
            ledger::AuditAction::Init => Self::Init,
            ledger::AuditAction::System => Self::System,
        }
    }
}

impl From<AuditAction> for ledger::AuditAction {
    fn from(value: AuditAction) -> Self {
        match value {
            AuditAction::CreateEntry => Self::CreateEntry,
            AuditAction::DeleteEntry => Self::DeleteEntry,
            AuditAction::ConfigChange => Self::ConfigChange,
            AuditAction::Init => Self::Init,
            AuditAction::System => Self::System,
        }
    }
}
