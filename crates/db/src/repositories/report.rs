//! Report repository: gathers balances and lines for report generation.
//!
//! Every report reads inside one transaction, so all its figures come from
//! the same snapshot. Composition happens in [`ReportService`].

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tally_core::ledger::validation::validate_date_range;
use tally_core::ledger::{
    Account, AccountTotals, AccountType, EntryLine, LedgerError, LedgerService,
};
use tally_core::reports::{
    BalanceSheetReport, GeneralLedgerReport, IncomeStatementReport, JournalReport, LedgerPosting,
    ReportHeader, ReportService, TrialBalanceReport,
};
use tally_shared::types::{EntryId, LineId, Money};
use tracing::instrument;

use super::company::stored_profile;
use super::ledger::{balances_in, read_entries, totals_by_account};
use crate::entities::{accounting_entries, chart_of_accounts, entry_lines};
use crate::store::{Store, StoreError, StoreTransaction};

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    store: Store,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Balance sheet as of a date (all entries when `None`).
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if a read fails.
    #[instrument(skip(self))]
    pub async fn balance_sheet(
        &self,
        as_of: Option<NaiveDate>,
    ) -> Result<BalanceSheetReport, LedgerError> {
        let txn = self.store.begin().await?;
        let header = header(&txn, as_of).await?;
        let mut balances = Vec::new();
        for account_type in AccountType::ALL {
            balances.extend(balances_in(&txn, account_type, as_of).await?);
        }
        txn.commit().await?;
        Ok(ReportService::generate_balance_sheet(header, &balances))
    }

    /// Income statement as of a date (all entries when `None`).
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if a read fails.
    #[instrument(skip(self))]
    pub async fn income_statement(
        &self,
        as_of: Option<NaiveDate>,
    ) -> Result<IncomeStatementReport, LedgerError> {
        let txn = self.store.begin().await?;
        let header = header(&txn, as_of).await?;
        let mut balances = balances_in(&txn, AccountType::Income, as_of).await?;
        balances.extend(balances_in(&txn, AccountType::Expense, as_of).await?);
        txn.commit().await?;
        Ok(ReportService::generate_income_statement(header, &balances))
    }

    /// Trial balance over every account with lines.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if a read fails.
    #[instrument(skip(self))]
    pub async fn trial_balance(
        &self,
        as_of: Option<NaiveDate>,
    ) -> Result<TrialBalanceReport, LedgerError> {
        let txn = self.store.begin().await?;
        let header = header(&txn, as_of).await?;
        let accounts = txn.read_all::<chart_of_accounts::Entity>().await?;
        let mut totals = totals_by_account(txn.connection(), None, as_of).await?;
        txn.commit().await?;

        let rows = accounts
            .into_iter()
            .map(|model| {
                let sums = totals.remove(&model.code).unwrap_or_default();
                (Account::from(model), sums)
            })
            .collect::<Vec<(Account, AccountTotals)>>();
        Ok(ReportService::generate_trial_balance(header, rows))
    }

    /// General ledger, optionally for one account and a date range.
    ///
    /// # Errors
    ///
    /// `InvalidDateRange` if `from > to`, `AccountNotFound` for an unknown
    /// account code.
    #[instrument(skip(self))]
    pub async fn general_ledger(
        &self,
        account: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<GeneralLedgerReport, LedgerError> {
        validate_date_range(from, to)?;

        let txn = self.store.begin().await?;
        let header = header(&txn, to).await?;
        let accounts = chart(&txn).await?;
        if let Some(code) = account
            && !accounts.contains_key(code)
        {
            return Err(LedgerError::AccountNotFound(code.to_string()));
        }

        let mut query = entry_lines::Entity::find().find_also_related(accounting_entries::Entity);
        if let Some(code) = account {
            query = query.filter(entry_lines::Column::AccountCode.eq(code));
        }
        if let Some(from) = from {
            query = query.filter(accounting_entries::Column::Date.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(accounting_entries::Column::Date.lte(to));
        }
        let rows = query
            .all(txn.connection())
            .await
            .map_err(StoreError::from)?;
        txn.commit().await?;

        let postings = rows
            .into_iter()
            .filter_map(|(line, entry)| {
                entry.map(|entry| LedgerPosting {
                    entry_id: EntryId::new(entry.id),
                    line_id: LineId::new(line.id),
                    date: entry.date,
                    concept: entry.concept,
                    account_code: line.account_code,
                    debit: Money::from_cents(line.debit_cents),
                    credit: Money::from_cents(line.credit_cents),
                })
            })
            .collect();

        Ok(ReportService::generate_general_ledger(
            header, from, to, &accounts, postings,
        ))
    }

    /// Journal of entries in a date range, oldest first, with their lines.
    ///
    /// # Errors
    ///
    /// `InvalidDateRange` if `from > to`.
    #[instrument(skip(self))]
    pub async fn journal(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<JournalReport, LedgerError> {
        validate_date_range(from, to)?;

        let txn = self.store.begin().await?;
        let header = header(&txn, to).await?;
        let accounts = chart(&txn).await?;
        let entries = read_entries(&txn, from, to).await?;
        let mut lines: HashMap<i64, Vec<EntryLine>> = HashMap::new();
        for model in txn.read_all::<entry_lines::Entity>().await? {
            lines
                .entry(model.entry_id)
                .or_default()
                .push(EntryLine::from(model));
        }
        txn.commit().await?;

        let details = entries
            .into_iter()
            .map(|entry| {
                let posted = lines.remove(&entry.id).unwrap_or_default();
                LedgerService::compose_detail(entry.into(), posted, &accounts)
            })
            .collect();
        Ok(ReportService::generate_journal(header, from, to, details))
    }
}

async fn header(
    txn: &StoreTransaction,
    as_of: Option<NaiveDate>,
) -> Result<ReportHeader, StoreError> {
    Ok(ReportHeader {
        company: stored_profile(txn).await?.unwrap_or_default(),
        generated_at: Utc::now(),
        as_of,
    })
}

async fn chart(txn: &StoreTransaction) -> Result<HashMap<String, Account>, StoreError> {
    Ok(txn
        .read_all::<chart_of_accounts::Entity>()
        .await?
        .into_iter()
        .map(|model| (model.code.clone(), Account::from(model)))
        .collect())
}
