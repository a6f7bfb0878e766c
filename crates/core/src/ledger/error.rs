//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur during ledger operations:
//! input validation, missing records, key conflicts, and store failures.

use tally_shared::AppError;
use tally_shared::types::{EntryId, Money};
use thiserror::Error;

/// Broad error category, used by front ends to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was rejected; nothing was written.
    Validation,
    /// The referenced record does not exist.
    NotFound,
    /// A record with the same key already exists.
    DuplicateKey,
    /// The store could not be opened, upgraded, read, or written.
    StoreUnavailable,
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry concept is empty or whitespace.
    #[error("Entry concept is required")]
    EmptyConcept,

    /// Entry has no lines.
    #[error("Entry must have at least one line")]
    NoLines,

    /// Entry date was not supplied.
    #[error("Entry date is required")]
    MissingDate,

    /// Entry date could not be parsed.
    #[error("Invalid entry date: {0}")]
    InvalidDate(String),

    /// A line has no account code.
    #[error("Line {line}: account code is required")]
    MissingAccountCode {
        /// 1-based line number.
        line: usize,
    },

    /// A line has a negative amount.
    #[error("Line {line}: amounts cannot be negative")]
    NegativeAmount {
        /// 1-based line number.
        line: usize,
    },

    /// A line has neither a debit nor a credit.
    #[error("Line {line}: enter a debit or a credit amount")]
    ZeroLine {
        /// 1-based line number.
        line: usize,
    },

    /// A line has both a debit and a credit.
    #[error("Line {line}: a line cannot carry both a debit and a credit")]
    BothSides {
        /// 1-based line number.
        line: usize,
    },

    /// A line references an account that does not exist.
    #[error("Line {line}: unknown account {code}")]
    UnknownAccount {
        /// 1-based line number.
        line: usize,
        /// The unknown code.
        code: String,
    },

    /// Debits and credits differ.
    #[error("Entry is not balanced: debit {debit} != credit {credit}")]
    UnbalancedEntry {
        /// Total debit.
        debit: Money,
        /// Total credit.
        credit: Money,
    },

    /// An amount is too large to store.
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(Money),

    /// Start of a date range falls after its end.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// Range start.
        from: chrono::NaiveDate,
        /// Range end.
        to: chrono::NaiveDate,
    },

    /// Account code for a new account is empty.
    #[error("Account code is required")]
    EmptyAccountCode,

    /// Account name is empty.
    #[error("Account name is required")]
    EmptyAccountName,

    /// Parent account does not exist.
    #[error("Parent account not found: {0}")]
    ParentNotFound(String),

    /// Seeded accounts cannot be changed.
    #[error("Account {0} cannot be modified")]
    AccountNotEditable(String),

    // ========== Not Found ==========
    /// Entry does not exist.
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    /// Account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // ========== Store Errors ==========
    /// A record with the same key already exists.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// The store failed.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl LedgerError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyConcept
            | Self::NoLines
            | Self::MissingDate
            | Self::InvalidDate(_)
            | Self::MissingAccountCode { .. }
            | Self::NegativeAmount { .. }
            | Self::ZeroLine { .. }
            | Self::BothSides { .. }
            | Self::UnknownAccount { .. }
            | Self::UnbalancedEntry { .. }
            | Self::AmountOutOfRange(_)
            | Self::InvalidDateRange { .. }
            | Self::EmptyAccountCode
            | Self::EmptyAccountName
            | Self::ParentNotFound(_)
            | Self::AccountNotEditable(_) => ErrorKind::Validation,

            Self::EntryNotFound(_) | Self::AccountNotFound(_) => ErrorKind::NotFound,

            Self::DuplicateKey(_) => ErrorKind::DuplicateKey,

            Self::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyConcept => "EMPTY_CONCEPT",
            Self::NoLines => "NO_LINES",
            Self::MissingDate => "MISSING_DATE",
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::MissingAccountCode { .. } => "MISSING_ACCOUNT_CODE",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::ZeroLine { .. } => "ZERO_LINE",
            Self::BothSides { .. } => "BOTH_SIDES",
            Self::UnknownAccount { .. } => "UNKNOWN_ACCOUNT",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::AmountOutOfRange(_) => "AMOUNT_OUT_OF_RANGE",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::EmptyAccountCode => "EMPTY_ACCOUNT_CODE",
            Self::EmptyAccountName => "EMPTY_ACCOUNT_NAME",
            Self::ParentNotFound(_) => "PARENT_NOT_FOUND",
            Self::AccountNotEditable(_) => "ACCOUNT_NOT_EDITABLE",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Returns true if retrying the same call could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::from(&err)
    }
}

impl From<&LedgerError> for AppError {
    fn from(err: &LedgerError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => Self::Validation(message),
            ErrorKind::NotFound => Self::NotFound(message),
            ErrorKind::DuplicateKey => Self::Conflict(message),
            ErrorKind::StoreUnavailable => Self::Storage(message),
        }
    }
}
