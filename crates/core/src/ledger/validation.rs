//! Business rule validation for ledger operations.
//!
//! Every check runs before anything is written; the first failure wins.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::Money;

use super::account::NewAccount;
use super::error::LedgerError;
use super::types::{EntryFilter, EntryLineInput, EntryTotals, ValidatedLine};

/// Accepted text format for entry dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an entry date typed as `YYYY-MM-DD`.
///
/// # Errors
///
/// `MissingDate` for blank input, `InvalidDate` when it does not parse.
pub fn parse_entry_date(raw: &str) -> Result<NaiveDate, LedgerError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LedgerError::MissingDate);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| LedgerError::InvalidDate(raw.to_string()))
}

/// Validates one line; `position` is 1-based.
///
/// Checks, in order: account code present, amounts non-negative, exactly one
/// side nonzero. Amounts are compared after rounding to two places.
///
/// # Errors
///
/// Returns the first rule the line breaks.
pub fn validate_line(position: usize, line: &EntryLineInput) -> Result<ValidatedLine, LedgerError> {
    let account_code = line.account_code.trim();
    if account_code.is_empty() {
        return Err(LedgerError::MissingAccountCode { line: position });
    }

    if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount { line: position });
    }

    let debit = Money::new(line.debit);
    let credit = Money::new(line.credit);
    for amount in [debit, credit] {
        if amount.cents().is_err() {
            return Err(LedgerError::AmountOutOfRange(amount));
        }
    }
    match (debit.is_positive(), credit.is_positive()) {
        (true, true) => Err(LedgerError::BothSides { line: position }),
        (false, false) => Err(LedgerError::ZeroLine { line: position }),
        _ => Ok(ValidatedLine {
            account_code: account_code.to_string(),
            debit,
            credit,
        }),
    }
}

/// Sums validated lines.
#[must_use]
pub fn calculate_totals(lines: &[ValidatedLine]) -> EntryTotals {
    EntryTotals {
        debit: lines.iter().map(|l| l.debit).sum(),
        credit: lines.iter().map(|l| l.credit).sum(),
    }
}

/// Checks that debits equal credits.
///
/// # Errors
///
/// `UnbalancedEntry` carrying both totals.
pub fn ensure_balanced(lines: &[ValidatedLine]) -> Result<EntryTotals, LedgerError> {
    let totals = calculate_totals(lines);
    if totals.is_balanced() {
        Ok(totals)
    } else {
        Err(LedgerError::UnbalancedEntry {
            debit: totals.debit,
            credit: totals.credit,
        })
    }
}

/// Checks that a date range is not inverted.
///
/// # Errors
///
/// `InvalidDateRange` when both bounds are set and `from > to`.
pub fn validate_date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(), LedgerError> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(LedgerError::InvalidDateRange { from, to }),
        _ => Ok(()),
    }
}

/// Validates the shape of a new account; parent existence is checked by the caller.
///
/// # Errors
///
/// `EmptyAccountCode` or `EmptyAccountName`.
pub fn validate_new_account(input: &NewAccount) -> Result<(), LedgerError> {
    if input.code.trim().is_empty() {
        return Err(LedgerError::EmptyAccountCode);
    }
    if input.name.trim().is_empty() {
        return Err(LedgerError::EmptyAccountName);
    }
    Ok(())
}

impl EntryFilter {
    /// Validates the date bounds.
    ///
    /// # Errors
    ///
    /// `InvalidDateRange` when `from_date > to_date`.
    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_date_range(self.from_date, self.to_date)
    }

    /// Returns true if `concept` contains the filter text, ignoring case.
    #[must_use]
    pub fn matches_concept(&self, concept: &str) -> bool {
        match self.concept_contains.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => concept.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}
