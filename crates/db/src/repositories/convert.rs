//! Conversions between stored models and domain types.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use tally_core::ledger::{Account, AuditRecord, CompanyProfile, Entry, EntryLine, LedgerError};
use tally_shared::types::{AuditId, EntryId, LineId, Money};

use crate::entities::{
    accounting_entries, audit_log, chart_of_accounts, company_config, entry_lines,
};

/// Amount in cents, as stored.
pub(crate) fn cents(amount: Money) -> Result<i64, LedgerError> {
    amount
        .cents()
        .map_err(|_| LedgerError::AmountOutOfRange(amount))
}

impl From<chart_of_accounts::Model> for Account {
    fn from(model: chart_of_accounts::Model) -> Self {
        Self {
            code: model.code,
            name: model.name,
            parent_code: model.parent_code,
            account_type: model.account_type.into(),
            editable: model.editable,
        }
    }
}

impl From<accounting_entries::Model> for Entry {
    fn from(model: accounting_entries::Model) -> Self {
        Self {
            id: EntryId::new(model.id),
            date: model.date,
            concept: model.concept,
            total_debit: Money::from_cents(model.total_debit_cents),
            total_credit: Money::from_cents(model.total_credit_cents),
            created_at: model.created_at,
        }
    }
}

impl From<entry_lines::Model> for EntryLine {
    fn from(model: entry_lines::Model) -> Self {
        Self {
            id: LineId::new(model.id),
            entry_id: EntryId::new(model.entry_id),
            account_code: model.account_code,
            debit: Money::from_cents(model.debit_cents),
            credit: Money::from_cents(model.credit_cents),
        }
    }
}

impl From<audit_log::Model> for AuditRecord {
    fn from(model: audit_log::Model) -> Self {
        Self {
            id: AuditId::new(model.id),
            action: model.action.into(),
            entry_id: model.entry_id.map(EntryId::new),
            timestamp: model.timestamp,
            details: model.details,
        }
    }
}

impl From<company_config::Model> for CompanyProfile {
    fn from(model: company_config::Model) -> Self {
        Self {
            name: model.name,
            phone: model.phone,
            email: model.email,
            address: model.address,
            tax_id: model.tax_id,
            logo: model.logo,
            updated_at: Some(model.updated_at),
        }
    }
}

pub(crate) fn account_record(account: &Account) -> chart_of_accounts::ActiveModel {
    chart_of_accounts::ActiveModel {
        code: Set(account.code.clone()),
        name: Set(account.name.clone()),
        parent_code: Set(account.parent_code.clone()),
        account_type: Set(account.account_type.into()),
        editable: Set(account.editable),
    }
}

pub(crate) fn company_record(
    profile: &CompanyProfile,
    updated_at: DateTime<Utc>,
) -> company_config::ActiveModel {
    company_config::ActiveModel {
        id: Set(company_config::COMPANY_KEY),
        name: Set(profile.name.clone()),
        phone: Set(profile.phone.clone()),
        email: Set(profile.email.clone()),
        address: Set(profile.address.clone()),
        tax_id: Set(profile.tax_id.clone()),
        logo: Set(profile.logo.clone()),
        updated_at: Set(updated_at),
    }
}
