//! Ledger domain types for entry creation, storage, and retrieval.
//!
//! This module defines the core types used for creating and validating
//! accounting entries in the double-entry bookkeeping system.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{EntryId, LineId, Money};

/// Label shown for a line whose account cannot be resolved.
pub const UNKNOWN_ACCOUNT_LABEL: &str = "Unknown account";

/// Input for a single line of a new entry.
///
/// Exactly one of `debit` / `credit` must be positive; the other must be zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryLineInput {
    /// Account to post to.
    pub account_code: String,
    /// Debit amount.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit: Decimal,
}

impl EntryLineInput {
    /// A debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    /// A credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

/// Input for creating a new entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntryInput {
    /// Accounting date.
    pub date: NaiveDate,
    /// Free-text description.
    pub concept: String,
    /// Lines, in the order they should be stored.
    pub lines: Vec<EntryLineInput>,
}

/// A line that passed validation, amounts normalised to two places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLine {
    /// Trimmed account code.
    pub account_code: String,
    /// Debit amount.
    pub debit: Money,
    /// Credit amount.
    pub credit: Money,
}

/// Debit and credit totals of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Sum of debits.
    pub debit: Money,
    /// Sum of credits.
    pub credit: Money,
}

impl EntryTotals {
    /// Returns true when debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }
}

/// An entry ready to be written: validated lines plus totals.
#[derive(Debug, Clone)]
pub struct ValidatedEntry {
    /// Accounting date.
    pub date: NaiveDate,
    /// Trimmed concept.
    pub concept: String,
    /// Lines in input order.
    pub lines: Vec<ValidatedLine>,
    /// Totals; always balanced.
    pub totals: EntryTotals,
}

/// A stored entry header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned id.
    pub id: EntryId,
    /// Accounting date.
    pub date: NaiveDate,
    /// Description.
    pub concept: String,
    /// Sum of line debits.
    pub total_debit: Money,
    /// Sum of line credits.
    pub total_credit: Money,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

/// A stored entry line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLine {
    /// Store-assigned id.
    pub id: LineId,
    /// Owning entry.
    pub entry_id: EntryId,
    /// Account posted to.
    pub account_code: String,
    /// Debit amount.
    pub debit: Money,
    /// Credit amount.
    pub credit: Money,
}

/// A stored line with its account name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLineDetail {
    /// The line.
    #[serde(flatten)]
    pub line: EntryLine,
    /// Account name, or [`UNKNOWN_ACCOUNT_LABEL`].
    pub account_name: String,
}

/// An entry with all of its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDetail {
    /// Entry header.
    pub entry: Entry,
    /// Lines in insertion order.
    pub lines: Vec<EntryLineDetail>,
}

/// Criteria for listing entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Earliest date, inclusive.
    pub from_date: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub to_date: Option<NaiveDate>,
    /// Case-insensitive substring of the concept.
    pub concept_contains: Option<String>,
}
