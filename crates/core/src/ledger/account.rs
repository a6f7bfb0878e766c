//! Chart of accounts types.

use serde::{Deserialize, Serialize};

use super::balance::NormalSide;

/// Account classification.
///
/// In double-entry bookkeeping:
/// - Asset/Expense accounts grow with debits
/// - Liability/Equity/Income accounts grow with credits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Things owned.
    Asset,
    /// Things owed.
    Liability,
    /// Owner's stake.
    Equity,
    /// Costs incurred.
    Expense,
    /// Revenue earned.
    Income,
}

impl AccountType {
    /// All account types, in chart order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Expense,
        Self::Income,
    ];

    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// The side on which this account type normally carries its balance.
    #[must_use]
    pub const fn normal_side(self) -> NormalSide {
        match self {
            Self::Asset | Self::Expense => NormalSide::Debit,
            Self::Liability | Self::Equity | Self::Income => NormalSide::Credit,
        }
    }

    /// Returns true for types reported on the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// An account in the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Hierarchical code ("1", "10", "100").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Parent code; empty for root accounts.
    pub parent_code: String,
    /// Classification.
    pub account_type: AccountType,
    /// Seeded accounts are fixed; user-created ones may be renamed.
    pub editable: bool,
}

impl Account {
    /// Returns true if the account has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_code.is_empty()
    }
}

/// Input for adding an account to the chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Code, unique across the chart.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Parent code; `None` or blank for a root account.
    pub parent_code: Option<String>,
    /// Classification.
    pub account_type: AccountType,
}

impl NewAccount {
    /// Parent code normalised to the stored form (empty for roots).
    #[must_use]
    pub fn parent(&self) -> &str {
        self.parent_code.as_deref().map_or("", str::trim)
    }
}
