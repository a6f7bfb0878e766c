//! Ledger repository: entries, lines, and balances.
//!
//! Each write validates first, then runs in a single transaction:
//! - `create_entry` inserts the entry, its lines, and a `create_entry` audit record
//! - `delete_entry` removes the lines, then the entry, then audits the deletion
//!
//! Balances are never stored; they are summed from the lines on demand.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
};
use tally_core::ledger::audit::{created_entry_details, deleted_entry_details};
use tally_core::ledger::{
    Account, AccountBalance, AccountTotals, AccountType, AuditAction, CreateEntryInput, Entry,
    EntryDetail, EntryFilter, EntryLine, LedgerError, LedgerService, Recorded,
};
use tally_shared::types::{AuditId, EntryId, Money};
use tracing::{info, instrument};

use super::audit::{append, record_in_savepoint};
use super::convert::cents;
use crate::entities::{accounting_entries, chart_of_accounts, entry_lines};
use crate::store::{KeyRange, Store, StoreError, StoreTransaction};

/// Ledger repository for entry and balance operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    store: Store,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Validates and records a new entry with its lines.
    ///
    /// Nothing is written unless every check passes. The audit outcome is
    /// reported separately; a failed audit insert does not undo the entry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The concept is blank or there are no lines
    /// - A line is malformed or names an unknown account
    /// - Debits and credits differ
    /// - The store fails
    #[instrument(skip(self, input), fields(concept = %input.concept, lines = input.lines.len()))]
    pub async fn create_entry(
        &self,
        input: &CreateEntryInput,
    ) -> Result<Recorded<EntryDetail>, LedgerError> {
        let txn = self.store.begin().await?;

        let codes: Vec<&str> = input
            .lines
            .iter()
            .map(|line| line.account_code.trim())
            .filter(|code| !code.is_empty())
            .collect();
        let accounts = accounts_by_code(&txn, &codes).await?;
        let validated =
            LedgerService::validate_entry(input, |code| Ok(accounts.contains_key(code)))?;

        let entry = txn
            .create(accounting_entries::ActiveModel {
                id: NotSet,
                date: Set(validated.date),
                concept: Set(validated.concept.clone()),
                total_debit_cents: Set(cents(validated.totals.debit)?),
                total_credit_cents: Set(cents(validated.totals.credit)?),
                created_at: Set(Utc::now()),
            })
            .await?;

        let mut lines = Vec::with_capacity(validated.lines.len());
        for line in &validated.lines {
            let model = txn
                .create(entry_lines::ActiveModel {
                    id: NotSet,
                    entry_id: Set(entry.id),
                    account_code: Set(line.account_code.clone()),
                    debit_cents: Set(cents(line.debit)?),
                    credit_cents: Set(cents(line.credit)?),
                })
                .await?;
            lines.push(EntryLine::from(model));
        }

        let entry = Entry::from(entry);
        let audit = record_in_savepoint(
            &txn,
            AuditAction::CreateEntry,
            created_entry_details(entry.id, &entry.concept),
            Some(entry.id),
        )
        .await;

        txn.commit().await?;
        info!(entry_id = %entry.id, total = %entry.total_debit, "Entry created");

        Ok(Recorded {
            value: LedgerService::compose_detail(entry, lines, &accounts),
            audit,
        })
    }

    /// Deletes an entry and every line that belongs to it.
    ///
    /// All or nothing: if any line cannot be removed the entry stays.
    ///
    /// # Errors
    ///
    /// `EntryNotFound` if there is no such entry, `StoreUnavailable` if a
    /// delete fails.
    #[instrument(skip(self))]
    pub async fn delete_entry(&self, id: EntryId) -> Result<Recorded<()>, LedgerError> {
        let txn = self.store.begin().await?;

        let entry = txn
            .read::<accounting_entries::Entity>(id.into_inner())
            .await?
            .ok_or(LedgerError::EntryNotFound(id))?;

        let by_entry = KeyRange::only(id.into_inner());
        let lines = txn
            .read_all_by_index(&entry_lines::BY_ENTRY, &by_entry)
            .await?;
        for line in &lines {
            txn.delete::<entry_lines::Entity>(line.id).await?;
        }

        let remaining = txn
            .read_all_by_index(&entry_lines::BY_ENTRY, &by_entry)
            .await?;
        if !remaining.is_empty() {
            return Err(LedgerError::StoreUnavailable(format!(
                "{} line(s) of entry {id} remain after delete",
                remaining.len()
            )));
        }

        txn.delete::<accounting_entries::Entity>(id.into_inner())
            .await?;

        let audit = record_in_savepoint(
            &txn,
            AuditAction::DeleteEntry,
            deleted_entry_details(id, &entry.concept),
            Some(id),
        )
        .await;

        txn.commit().await?;
        info!(entry_id = %id, lines = lines.len(), "Entry deleted");

        Ok(Recorded { value: (), audit })
    }

    /// Lists entries, newest first.
    ///
    /// Date bounds are inclusive and read through the date index; the concept
    /// filter is a case-insensitive substring match.
    ///
    /// # Errors
    ///
    /// `InvalidDateRange` if `from_date > to_date`.
    pub async fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>, LedgerError> {
        filter.validate()?;

        let txn = self.store.begin().await?;
        let models = read_entries(&txn, filter.from_date, filter.to_date).await?;
        txn.commit().await?;

        let mut entries: Vec<Entry> = models
            .into_iter()
            .filter(|model| filter.matches_concept(&model.concept))
            .map(Entry::from)
            .collect();
        LedgerService::sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Returns an entry with its lines and account names.
    ///
    /// # Errors
    ///
    /// `EntryNotFound` if there is no such entry.
    pub async fn get_entry_detail(&self, id: EntryId) -> Result<EntryDetail, LedgerError> {
        let txn = self.store.begin().await?;

        let entry = txn
            .read::<accounting_entries::Entity>(id.into_inner())
            .await?
            .ok_or(LedgerError::EntryNotFound(id))?;
        let lines: Vec<EntryLine> = txn
            .read_all_by_index(&entry_lines::BY_ENTRY, &KeyRange::only(id.into_inner()))
            .await?
            .into_iter()
            .map(EntryLine::from)
            .collect();
        let codes: Vec<&str> = lines.iter().map(|l| l.account_code.as_str()).collect();
        let accounts = accounts_by_code(&txn, &codes).await?;

        txn.commit().await?;
        Ok(LedgerService::compose_detail(
            Entry::from(entry),
            lines,
            &accounts,
        ))
    }

    /// Raw balance of an account: total debits minus total credits.
    ///
    /// With `as_of`, only entries dated on or before it count.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` for an unknown code.
    pub async fn account_balance(
        &self,
        code: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Money, LedgerError> {
        let txn = self.store.begin().await?;
        if txn
            .read::<chart_of_accounts::Entity>(code.to_string())
            .await?
            .is_none()
        {
            return Err(LedgerError::AccountNotFound(code.to_string()));
        }
        let totals = totals_by_account(txn.connection(), Some(code), as_of).await?;
        txn.commit().await?;

        Ok(totals.get(code).map_or(Money::ZERO, AccountTotals::net))
    }

    /// Accounts of one type with a nonzero balance, in index order.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn balances_by_type(
        &self,
        account_type: AccountType,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<AccountBalance>, LedgerError> {
        let txn = self.store.begin().await?;
        let balances = balances_in(&txn, account_type, as_of).await?;
        txn.commit().await?;
        Ok(balances)
    }

    /// Appends an audit record in its own transaction.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the write fails.
    pub async fn log_audit(
        &self,
        action: AuditAction,
        details: impl Into<String>,
        entry_id: Option<EntryId>,
    ) -> Result<AuditId, LedgerError> {
        let txn = self.store.begin().await?;
        let id = append(&txn, action, details.into(), entry_id).await?;
        txn.commit().await?;
        Ok(id)
    }

    /// Every line posted to an account, ordered by id.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn lines_for_account(&self, code: &str) -> Result<Vec<EntryLine>, LedgerError> {
        let txn = self.store.begin().await?;
        let models = txn
            .read_all_by_index(&entry_lines::BY_ACCOUNT, &KeyRange::only(code))
            .await?;
        txn.commit().await?;
        Ok(models.into_iter().map(EntryLine::from).collect())
    }

    /// Lines of one entry posted to one account.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn lines_for_entry_and_account(
        &self,
        id: EntryId,
        code: &str,
    ) -> Result<Vec<EntryLine>, LedgerError> {
        let txn = self.store.begin().await?;
        let range = KeyRange::Only(vec![id.into_inner().into(), code.into()]);
        let models = txn
            .read_all_by_index(&entry_lines::BY_ENTRY_ACCOUNT, &range)
            .await?;
        txn.commit().await?;
        Ok(models.into_iter().map(EntryLine::from).collect())
    }
}

/// Looks up the given codes; unknown codes are simply absent from the map.
pub(crate) async fn accounts_by_code(
    txn: &StoreTransaction,
    codes: &[&str],
) -> Result<HashMap<String, Account>, StoreError> {
    let mut accounts = HashMap::with_capacity(codes.len());
    for &code in codes {
        if accounts.contains_key(code) {
            continue;
        }
        if let Some(model) = txn
            .read::<chart_of_accounts::Entity>(code.to_string())
            .await?
        {
            accounts.insert(model.code.clone(), Account::from(model));
        }
    }
    Ok(accounts)
}

/// Entries inside optional inclusive date bounds.
pub(crate) async fn read_entries(
    txn: &StoreTransaction,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<accounting_entries::Model>, StoreError> {
    match KeyRange::from_bounds(from, to) {
        Some(range) => {
            txn.read_all_by_index(&accounting_entries::BY_DATE, &range)
                .await
        }
        None => txn.read_all::<accounting_entries::Entity>().await,
    }
}

/// Debit and credit sums per account code.
///
/// Accounts without lines are absent. With `as_of`, only entries dated on or
/// before it count. Lines are added as `Money`, not with SQL `SUM`, so a total
/// past the 64-bit range of a single cents column stays exact.
pub(crate) async fn totals_by_account<C: ConnectionTrait>(
    db: &C,
    code: Option<&str>,
    as_of: Option<NaiveDate>,
) -> Result<HashMap<String, AccountTotals>, StoreError> {
    let mut query = entry_lines::Entity::find()
        .select_only()
        .column(entry_lines::Column::AccountCode)
        .column(entry_lines::Column::DebitCents)
        .column(entry_lines::Column::CreditCents);

    if let Some(code) = code {
        query = query.filter(entry_lines::Column::AccountCode.eq(code));
    }
    if let Some(as_of) = as_of {
        query = query
            .join(
                JoinType::InnerJoin,
                entry_lines::Relation::AccountingEntries.def(),
            )
            .filter(accounting_entries::Column::Date.lte(as_of));
    }

    let rows: Vec<(String, i64, i64)> = query.into_tuple().all(db).await?;
    let mut totals: HashMap<String, AccountTotals> = HashMap::new();
    for (code, debit, credit) in rows {
        totals
            .entry(code)
            .or_default()
            .add(Money::from_cents(debit), Money::from_cents(credit));
    }
    Ok(totals)
}

/// Nonzero raw balances of one account type, read through the type index.
pub(crate) async fn balances_in(
    txn: &StoreTransaction,
    account_type: AccountType,
    as_of: Option<NaiveDate>,
) -> Result<Vec<AccountBalance>, StoreError> {
    let accounts = txn
        .read_all_by_index(
            &chart_of_accounts::BY_TYPE,
            &KeyRange::only(account_type.as_str()),
        )
        .await?;
    let totals = totals_by_account(txn.connection(), None, as_of).await?;

    Ok(accounts
        .into_iter()
        .filter_map(|model| {
            let balance = totals.get(&model.code).map(AccountTotals::net)?;
            (!balance.is_zero()).then(|| AccountBalance {
                account: Account::from(model),
                balance,
            })
        })
        .collect())
}
