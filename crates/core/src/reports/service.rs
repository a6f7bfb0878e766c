//! Report generation service.
//!
//! Inputs are raw balances (`debit - credit`) and stored lines; this module
//! only groups, signs, and totals them.

use std::collections::{BTreeMap, HashMap};

use tally_shared::types::Money;

use super::types::{
    BalanceSheetReport, GeneralLedgerAccount, GeneralLedgerLine, GeneralLedgerReport,
    IncomeStatementReport, JournalReport, LedgerPosting, ReportHeader, ReportLine, ReportSection,
    TrialBalanceReport, TrialBalanceRow,
};
use crate::ledger::{
    Account, AccountBalance, AccountTotals, AccountType, EntryDetail, RunningBalance,
    UNKNOWN_ACCOUNT_LABEL,
};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates a balance sheet from raw account balances.
    ///
    /// Liabilities and equity are shown credit-normal. Income and expense
    /// balances are folded into a single net income figure under equity.
    #[must_use]
    pub fn generate_balance_sheet(
        header: ReportHeader,
        balances: &[AccountBalance],
    ) -> BalanceSheetReport {
        let assets = Self::section(balances, AccountType::Asset);
        let liabilities = Self::section(balances, AccountType::Liability);
        let equity = Self::section(balances, AccountType::Equity);
        let net_income = Self::net_income(balances);

        let total_assets = assets.total;
        let total_liabilities_and_equity = liabilities.total + equity.total + net_income;

        BalanceSheetReport {
            header,
            assets,
            liabilities,
            equity,
            net_income,
            total_assets,
            total_liabilities_and_equity,
            is_balanced: total_assets == total_liabilities_and_equity,
        }
    }

    /// Generates an income statement from raw account balances.
    #[must_use]
    pub fn generate_income_statement(
        header: ReportHeader,
        balances: &[AccountBalance],
    ) -> IncomeStatementReport {
        let income = Self::section(balances, AccountType::Income);
        let expenses = Self::section(balances, AccountType::Expense);
        let net_income = income.total - expenses.total;

        IncomeStatementReport {
            header,
            income,
            expenses,
            net_income,
        }
    }

    /// Generates a trial balance from per-account totals.
    ///
    /// Accounts without lines are left out; rows come out in code order.
    #[must_use]
    pub fn generate_trial_balance(
        header: ReportHeader,
        totals: Vec<(Account, AccountTotals)>,
    ) -> TrialBalanceReport {
        let mut rows: Vec<TrialBalanceRow> = totals
            .into_iter()
            .filter(|(_, t)| !(t.debit.is_zero() && t.credit.is_zero()))
            .map(|(account, t)| TrialBalanceRow {
                code: account.code,
                name: account.name,
                account_type: account.account_type,
                debit: t.debit,
                credit: t.credit,
                balance: t.net(),
            })
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));

        let total_debit: Money = rows.iter().map(|r| r.debit).sum();
        let total_credit: Money = rows.iter().map(|r| r.credit).sum();

        TrialBalanceReport {
            header,
            rows,
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Generates a general ledger: lines grouped per account with running balances.
    ///
    /// Groups are ordered by account code; lines within a group by
    /// `(date, entry_id, line_id)`.
    #[must_use]
    pub fn generate_general_ledger(
        header: ReportHeader,
        from: Option<chrono::NaiveDate>,
        to: Option<chrono::NaiveDate>,
        accounts: &HashMap<String, Account>,
        postings: Vec<LedgerPosting>,
    ) -> GeneralLedgerReport {
        let mut grouped: BTreeMap<String, Vec<LedgerPosting>> = BTreeMap::new();
        for posting in postings {
            grouped
                .entry(posting.account_code.clone())
                .or_default()
                .push(posting);
        }

        let accounts = grouped
            .into_iter()
            .map(|(code, mut postings)| {
                postings.sort_by(|a, b| {
                    (a.date, a.entry_id, a.line_id).cmp(&(b.date, b.entry_id, b.line_id))
                });
                let name = accounts
                    .get(&code)
                    .map_or_else(|| UNKNOWN_ACCOUNT_LABEL.to_string(), |a| a.name.clone());
                Self::ledger_account(code, name, postings)
            })
            .collect();

        GeneralLedgerReport {
            header,
            from,
            to,
            accounts,
        }
    }

    /// Generates a journal: entries oldest first, ties broken by id.
    #[must_use]
    pub fn generate_journal(
        header: ReportHeader,
        from: Option<chrono::NaiveDate>,
        to: Option<chrono::NaiveDate>,
        mut entries: Vec<EntryDetail>,
    ) -> JournalReport {
        entries.sort_by(|a, b| {
            a.entry
                .date
                .cmp(&b.entry.date)
                .then(a.entry.id.cmp(&b.entry.id))
        });
        let total_debit = entries.iter().map(|e| e.entry.total_debit).sum();
        let total_credit = entries.iter().map(|e| e.entry.total_credit).sum();

        JournalReport {
            header,
            from,
            to,
            entries,
            total_debit,
            total_credit,
        }
    }

    fn ledger_account(
        code: String,
        name: String,
        postings: Vec<LedgerPosting>,
    ) -> GeneralLedgerAccount {
        let mut totals = AccountTotals::default();
        let mut running: Option<RunningBalance> = None;
        let mut lines = Vec::with_capacity(postings.len());

        for posting in postings {
            totals.add(posting.debit, posting.credit);
            let change = posting.debit - posting.credit;
            let next = match &running {
                None => RunningBalance::first(change),
                Some(previous) => RunningBalance::next(previous, change),
            };
            lines.push(GeneralLedgerLine {
                date: posting.date,
                entry_id: posting.entry_id,
                line_id: posting.line_id,
                concept: posting.concept,
                debit: posting.debit,
                credit: posting.credit,
                balance: next.current,
            });
            running = Some(next);
        }

        GeneralLedgerAccount {
            code,
            name,
            lines,
            total_debit: totals.debit,
            total_credit: totals.credit,
            closing_balance: totals.net(),
        }
    }

    fn section(balances: &[AccountBalance], account_type: AccountType) -> ReportSection {
        let mut section = ReportSection::default();
        for balance in balances
            .iter()
            .filter(|b| b.account.account_type == account_type && !b.balance.is_zero())
        {
            let amount = balance.presented();
            section.total += amount;
            section.lines.push(ReportLine {
                code: balance.account.code.clone(),
                name: balance.account.name.clone(),
                amount,
            });
        }
        section
    }

    fn net_income(balances: &[AccountBalance]) -> Money {
        balances
            .iter()
            .filter(|b| !b.account.account_type.is_balance_sheet())
            .map(|b| -b.balance)
            .sum()
    }
}
