//! Account balance calculations.
//!
//! Balances are always derived from entry lines, never stored. The raw
//! balance of an account is `sum(debit) - sum(credit)` over its lines.

use serde::{Deserialize, Serialize};
use tally_shared::types::Money;

use super::account::Account;

/// Side on which an account type normally carries its balance.
///
/// - Asset/Expense: debit-normal, shown as `debit - credit`
/// - Liability/Equity/Income: credit-normal, shown as `credit - debit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalSide {
    /// Debit-normal.
    Debit,
    /// Credit-normal.
    Credit,
}

impl NormalSide {
    /// Converts a raw `debit - credit` balance into this side's presentation.
    #[must_use]
    pub fn present(self, raw: Money) -> Money {
        match self {
            Self::Debit => raw,
            Self::Credit => -raw,
        }
    }

    /// Calculates the presented balance change for one line.
    #[must_use]
    pub fn balance_change(self, debit: Money, credit: Money) -> Money {
        self.present(debit - credit)
    }
}

/// Debit and credit totals accumulated over a set of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTotals {
    /// Sum of debits.
    pub debit: Money,
    /// Sum of credits.
    pub credit: Money,
}

impl AccountTotals {
    /// Totals from already-summed sides.
    #[must_use]
    pub const fn new(debit: Money, credit: Money) -> Self {
        Self { debit, credit }
    }

    /// Adds one line.
    pub fn add(&mut self, debit: Money, credit: Money) {
        self.debit += debit;
        self.credit += credit;
    }

    /// Raw balance: `debit - credit`.
    #[must_use]
    pub fn net(&self) -> Money {
        self.debit - self.credit
    }
}

/// Running balance information for one ledger line.
///
/// - previous: balance before this line
/// - current: balance after this line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Position of the line within the account, starting at 1.
    pub sequence: u64,
    /// Balance before this line.
    pub previous: Money,
    /// Balance after this line.
    pub current: Money,
}

impl RunningBalance {
    /// Running balance for the first line on an account.
    #[must_use]
    pub fn first(change: Money) -> Self {
        Self {
            sequence: 1,
            previous: Money::ZERO,
            current: change,
        }
    }

    /// Running balance following `previous`.
    ///
    /// - current[N] = previous[N] + change
    /// - previous[N] = current[N-1]
    #[must_use]
    pub fn next(previous: &Self, change: Money) -> Self {
        Self {
            sequence: previous.sequence + 1,
            previous: previous.current,
            current: previous.current + change,
        }
    }
}

/// An account paired with its raw balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account.
    pub account: Account,
    /// Raw balance: `sum(debit) - sum(credit)`.
    pub balance: Money,
}

impl AccountBalance {
    /// Balance shown on the account's normal side.
    #[must_use]
    pub fn presented(&self) -> Money {
        self.account.account_type.normal_side().present(self.balance)
    }
}
