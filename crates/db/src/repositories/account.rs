//! Account repository for chart of accounts operations.
//!
//! Seeded accounts are read-only; accounts added by the user can be renamed.
//! Accounts are never deleted.

use tally_core::ledger::validation::validate_new_account;
use tally_core::ledger::{Account, AccountType, AuditAction, LedgerError, NewAccount, Recorded};
use tracing::{info, instrument};

use super::audit::record_in_savepoint;
use super::convert::account_record;
use crate::entities::chart_of_accounts;
use crate::store::{KeyRange, SecondaryIndex, Store};

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    store: Store,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Gets an account by code.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if there is no such account.
    pub async fn get_account(&self, code: &str) -> Result<Account, LedgerError> {
        let txn = self.store.begin().await?;
        let model = txn
            .read::<chart_of_accounts::Entity>(code.to_string())
            .await?;
        txn.commit().await?;
        model
            .map(Account::from)
            .ok_or_else(|| LedgerError::AccountNotFound(code.to_string()))
    }

    /// Lists every account in code order.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let txn = self.store.begin().await?;
        let models = txn.read_all::<chart_of_accounts::Entity>().await?;
        txn.commit().await?;
        Ok(models.into_iter().map(Account::from).collect())
    }

    /// Direct children of an account; an empty code lists the roots.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn accounts_by_parent(&self, parent_code: &str) -> Result<Vec<Account>, LedgerError> {
        self.by_index(&chart_of_accounts::BY_PARENT, KeyRange::only(parent_code))
            .await
    }

    /// Accounts of one type.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn accounts_by_type(
        &self,
        account_type: AccountType,
    ) -> Result<Vec<Account>, LedgerError> {
        self.by_index(
            &chart_of_accounts::BY_TYPE,
            KeyRange::only(account_type.as_str()),
        )
        .await
    }

    /// Adds a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The code or name is blank
    /// - The parent code does not exist
    /// - The code is already taken (`DuplicateKey`)
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create_account(
        &self,
        input: &NewAccount,
    ) -> Result<Recorded<Account>, LedgerError> {
        validate_new_account(input)?;

        let account = Account {
            code: input.code.trim().to_string(),
            name: input.name.trim().to_string(),
            parent_code: input.parent().to_string(),
            account_type: input.account_type,
            editable: true,
        };

        let txn = self.store.begin().await?;
        if !account.is_root()
            && txn
                .read::<chart_of_accounts::Entity>(account.parent_code.clone())
                .await?
                .is_none()
        {
            return Err(LedgerError::ParentNotFound(account.parent_code));
        }

        txn.create(account_record(&account)).await?;
        let audit = record_in_savepoint(
            &txn,
            AuditAction::ConfigChange,
            format!("Added account {} {}", account.code, account.name),
            None,
        )
        .await;
        txn.commit().await?;
        info!(code = %account.code, "Account created");

        Ok(Recorded {
            value: account,
            audit,
        })
    }

    /// Renames a user account.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` for an unknown code, `AccountNotEditable` for a
    /// seeded account, `EmptyAccountName` for a blank name.
    #[instrument(skip(self))]
    pub async fn rename_account(
        &self,
        code: &str,
        name: &str,
    ) -> Result<Recorded<Account>, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyAccountName);
        }

        let txn = self.store.begin().await?;
        let mut account = txn
            .read::<chart_of_accounts::Entity>(code.to_string())
            .await?
            .map(Account::from)
            .ok_or_else(|| LedgerError::AccountNotFound(code.to_string()))?;
        if !account.editable {
            return Err(LedgerError::AccountNotEditable(account.code));
        }

        let previous = std::mem::replace(&mut account.name, name.to_string());
        txn.update(account_record(&account)).await?;
        let audit = record_in_savepoint(
            &txn,
            AuditAction::ConfigChange,
            format!("Renamed account {}: {previous} -> {}", account.code, account.name),
            None,
        )
        .await;
        txn.commit().await?;
        info!(code = %account.code, "Account renamed");

        Ok(Recorded {
            value: account,
            audit,
        })
    }

    async fn by_index(
        &self,
        index: &SecondaryIndex<chart_of_accounts::Entity>,
        range: KeyRange,
    ) -> Result<Vec<Account>, LedgerError> {
        let txn = self.store.begin().await?;
        let models = txn.read_all_by_index(index, &range).await?;
        txn.commit().await?;
        Ok(models.into_iter().map(Account::from).collect())
    }
}
