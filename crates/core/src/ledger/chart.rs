//! Default chart of accounts written on first run.

use super::account::{Account, AccountType};

/// One row of the built-in chart: `(code, name, parent_code, type)`.
type ChartRow = (&'static str, &'static str, &'static str, AccountType);

/// The built-in chart, parents listed before their children.
pub const DEFAULT_CHART: &[ChartRow] = &[
    ("1", "BASIC FINANCING", "", AccountType::Equity),
    ("10", "CAPITAL", "1", AccountType::Equity),
    ("100", "Share capital", "10", AccountType::Equity),
    ("2", "FIXED ASSETS", "", AccountType::Asset),
    ("21", "Tangible fixed assets", "2", AccountType::Asset),
    ("210", "Land and natural resources", "21", AccountType::Asset),
    ("3", "INVENTORY", "", AccountType::Asset),
    ("300", "Merchandise", "3", AccountType::Asset),
    ("4", "CREDITORS AND DEBTORS", "", AccountType::Liability),
    ("430", "Customers", "4", AccountType::Asset),
    ("400", "Suppliers", "4", AccountType::Liability),
    ("5", "FINANCIAL ACCOUNTS", "", AccountType::Asset),
    ("570", "Cash", "5", AccountType::Asset),
    ("571", "Banks", "5", AccountType::Asset),
    ("6", "PURCHASES AND EXPENSES", "", AccountType::Expense),
    ("600", "Merchandise purchases", "6", AccountType::Expense),
    ("621", "Leases and royalties", "6", AccountType::Expense),
    ("7", "SALES AND INCOME", "", AccountType::Income),
    ("700", "Merchandise sales", "7", AccountType::Income),
];

/// Materialises [`DEFAULT_CHART`] as non-editable accounts.
#[must_use]
pub fn default_chart() -> Vec<Account> {
    DEFAULT_CHART
        .iter()
        .map(|&(code, name, parent_code, account_type)| Account {
            code: code.to_string(),
            name: name.to_string(),
            parent_code: parent_code.to_string(),
            account_type,
            editable: false,
        })
        .collect()
}
