//! Ledger service: entry validation and read-side composition.
//!
//! Pure functions only. Account existence is supplied by the caller so the
//! same rules run against any store.

use std::collections::HashMap;

use super::account::Account;
use super::error::LedgerError;
use super::types::{
    CreateEntryInput, Entry, EntryDetail, EntryLine, EntryLineDetail, UNKNOWN_ACCOUNT_LABEL,
    ValidatedEntry,
};
use super::validation::{ensure_balanced, validate_line};

/// Ledger service for entry validation.
pub struct LedgerService;

impl LedgerService {
    /// Validates a new entry.
    ///
    /// Order, failing fast:
    /// 1. concept non-blank, at least one line
    /// 2. each line in input order: code, sign, one side, account exists
    /// 3. debits equal credits
    ///
    /// # Arguments
    ///
    /// * `input` - The entry to validate
    /// * `account_exists` - Returns whether an account code is known
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate_entry<F>(
        input: &CreateEntryInput,
        mut account_exists: F,
    ) -> Result<ValidatedEntry, LedgerError>
    where
        F: FnMut(&str) -> Result<bool, LedgerError>,
    {
        let concept = input.concept.trim();
        if concept.is_empty() {
            return Err(LedgerError::EmptyConcept);
        }
        if input.lines.is_empty() {
            return Err(LedgerError::NoLines);
        }

        let mut lines = Vec::with_capacity(input.lines.len());
        for (index, raw) in input.lines.iter().enumerate() {
            let position = index + 1;
            let line = validate_line(position, raw)?;
            if !account_exists(&line.account_code)? {
                return Err(LedgerError::UnknownAccount {
                    line: position,
                    code: line.account_code,
                });
            }
            lines.push(line);
        }

        let totals = ensure_balanced(&lines)?;

        Ok(ValidatedEntry {
            date: input.date,
            concept: concept.to_string(),
            lines,
            totals,
        })
    }

    /// Orders entries newest first: date descending, then id descending.
    pub fn sort_newest_first(entries: &mut [Entry]) {
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    }

    /// Attaches account names to an entry's lines.
    ///
    /// Lines keep their order; a code missing from `accounts` gets
    /// [`UNKNOWN_ACCOUNT_LABEL`].
    #[must_use]
    pub fn compose_detail(
        entry: Entry,
        lines: Vec<EntryLine>,
        accounts: &HashMap<String, Account>,
    ) -> EntryDetail {
        let lines = lines
            .into_iter()
            .map(|line| {
                let account_name = accounts
                    .get(&line.account_code)
                    .map_or_else(|| UNKNOWN_ACCOUNT_LABEL.to_string(), |a| a.name.clone());
                EntryLineDetail { line, account_name }
            })
            .collect();
        EntryDetail { entry, lines }
    }
}
