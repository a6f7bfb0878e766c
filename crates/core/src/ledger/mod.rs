//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Chart of accounts and the built-in default chart
//! - Entry input, validation, and balance rules
//! - Audit trail and company profile types
//! - Error types for ledger operations

pub mod account;
pub mod audit;
pub mod balance;
pub mod chart;
pub mod company;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use account::{Account, AccountType, NewAccount};
pub use audit::{AuditAction, AuditRecord, AuditStatus, Recorded};
pub use balance::{AccountBalance, AccountTotals, NormalSide, RunningBalance};
pub use chart::{DEFAULT_CHART, default_chart};
pub use company::CompanyProfile;
pub use error::{ErrorKind, LedgerError};
pub use service::LedgerService;
pub use types::{
    CreateEntryInput, Entry, EntryDetail, EntryFilter, EntryLine, EntryLineDetail,
    EntryLineInput, EntryTotals, UNKNOWN_ACCOUNT_LABEL, ValidatedEntry, ValidatedLine,
};
pub use validation::parse_entry_date;
