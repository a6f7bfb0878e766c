//! Company profile repository.

use chrono::Utc;
use tally_core::ledger::{AuditAction, CompanyProfile, LedgerError, Recorded};
use tracing::{info, instrument};

use super::audit::record_in_savepoint;
use super::convert::company_record;
use crate::entities::company_config::{self, COMPANY_KEY};
use crate::store::{Store, StoreError, StoreTransaction};

/// Reads the stored profile inside `txn`, if any.
pub(crate) async fn stored_profile(
    txn: &StoreTransaction,
) -> Result<Option<CompanyProfile>, StoreError> {
    Ok(txn
        .read::<company_config::Entity>(COMPANY_KEY)
        .await?
        .map(CompanyProfile::from))
}

/// Company profile repository.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    store: Store,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns the stored profile, or the defaults if none was saved.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn get_company_config(&self) -> Result<CompanyProfile, LedgerError> {
        let txn = self.store.begin().await?;
        let profile = stored_profile(&txn).await?;
        txn.commit().await?;
        Ok(profile.unwrap_or_default())
    }

    /// Replaces the profile and stamps `updated_at`.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the write fails.
    #[instrument(skip(self, profile), fields(name = %profile.name))]
    pub async fn save_company_config(
        &self,
        profile: &CompanyProfile,
    ) -> Result<Recorded<CompanyProfile>, LedgerError> {
        let updated_at = Utc::now();
        let txn = self.store.begin().await?;
        txn.update(company_record(profile, updated_at)).await?;
        let audit = record_in_savepoint(
            &txn,
            AuditAction::ConfigChange,
            format!("Company profile updated: {}", profile.name),
            None,
        )
        .await;
        txn.commit().await?;
        info!("Company profile saved");

        Ok(Recorded {
            value: CompanyProfile {
                updated_at: Some(updated_at),
                ..profile.clone()
            },
            audit,
        })
    }
}
