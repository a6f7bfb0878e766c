//! Report data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tally_shared::types::{EntryId, LineId, Money};

use crate::ledger::{AccountType, CompanyProfile, EntryDetail};

/// Header stamped on every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportHeader {
    /// Company profile at generation time.
    pub company: CompanyProfile,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Cut-off date, if any.
    pub as_of: Option<NaiveDate>,
}

/// One account line in a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Amount on the section's normal side.
    pub amount: Money,
}

/// A titled group of account lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSection {
    /// Lines in chart order.
    pub lines: Vec<ReportLine>,
    /// Sum of line amounts.
    pub total: Money,
}

/// Balance sheet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Report header.
    pub header: ReportHeader,
    /// Assets, debit-normal.
    pub assets: ReportSection,
    /// Liabilities, credit-normal.
    pub liabilities: ReportSection,
    /// Equity, credit-normal.
    pub equity: ReportSection,
    /// Current result (income - expense), shown under equity.
    pub net_income: Money,
    /// Total assets.
    pub total_assets: Money,
    /// Liabilities plus equity plus net income.
    pub total_liabilities_and_equity: Money,
    /// Whether assets equal liabilities plus equity plus net income.
    pub is_balanced: bool,
}

/// Income statement report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Report header.
    pub header: ReportHeader,
    /// Income, credit-normal.
    pub income: ReportSection,
    /// Expenses, debit-normal.
    pub expenses: ReportSection,
    /// Income minus expenses.
    pub net_income: Money,
}

/// Debit and credit totals for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Total debit.
    pub debit: Money,
    /// Total credit.
    pub credit: Money,
    /// Debit minus credit.
    pub balance: Money,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Report header.
    pub header: ReportHeader,
    /// Accounts with at least one line, in code order.
    pub rows: Vec<TrialBalanceRow>,
    /// Total debit.
    pub total_debit: Money,
    /// Total credit.
    pub total_credit: Money,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// A line as read for the general ledger, before grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPosting {
    /// Owning entry.
    pub entry_id: EntryId,
    /// Line id.
    pub line_id: LineId,
    /// Entry date.
    pub date: NaiveDate,
    /// Entry concept.
    pub concept: String,
    /// Account posted to.
    pub account_code: String,
    /// Debit amount.
    pub debit: Money,
    /// Credit amount.
    pub credit: Money,
}

/// One line of an account's ledger with its running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralLedgerLine {
    /// Entry date.
    pub date: NaiveDate,
    /// Owning entry.
    pub entry_id: EntryId,
    /// Line id.
    pub line_id: LineId,
    /// Entry concept.
    pub concept: String,
    /// Debit amount.
    pub debit: Money,
    /// Credit amount.
    pub credit: Money,
    /// Debit minus credit, accumulated up to and including this line.
    pub balance: Money,
}

/// One account of the general ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerAccount {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Lines in date order.
    pub lines: Vec<GeneralLedgerLine>,
    /// Total debit.
    pub total_debit: Money,
    /// Total credit.
    pub total_credit: Money,
    /// Balance after the last line.
    pub closing_balance: Money,
}

/// General ledger report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerReport {
    /// Report header.
    pub header: ReportHeader,
    /// Earliest date, inclusive.
    pub from: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub to: Option<NaiveDate>,
    /// Accounts in code order.
    pub accounts: Vec<GeneralLedgerAccount>,
}

/// Journal report: entries with their lines in date order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalReport {
    /// Report header.
    pub header: ReportHeader,
    /// Earliest date, inclusive.
    pub from: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub to: Option<NaiveDate>,
    /// Entries, oldest first.
    pub entries: Vec<EntryDetail>,
    /// Sum of entry debits.
    pub total_debit: Money,
    /// Sum of entry credits.
    pub total_credit: Money,
}
