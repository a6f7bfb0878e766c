//! First-run initialisation.
//!
//! A store counts as initialised once it holds a company profile. The first
//! call writes the profile, the default chart of accounts, and an `init`
//! audit record in one transaction; later calls change nothing.

use chrono::Utc;
use tally_core::ledger::{AuditAction, CompanyProfile, LedgerError, default_chart};
use tally_shared::CompanyDefaults;
use tracing::{debug, info, instrument};

use crate::repositories::audit::append;
use crate::repositories::company::stored_profile;
use crate::repositories::convert::{account_record, company_record};
use crate::store::Store;

/// What [`initialize`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SeedOutcome {
    /// The store was empty and has been seeded.
    Seeded {
        /// Accounts written.
        accounts: usize,
    },
    /// The store was already initialised.
    AlreadyInitialized,
}

/// Seeds an empty store with the company defaults and the default chart.
///
/// # Errors
///
/// `StoreUnavailable` if a write fails; nothing is written in that case.
#[instrument(skip_all)]
pub async fn initialize(
    store: &Store,
    defaults: &CompanyDefaults,
) -> Result<SeedOutcome, LedgerError> {
    let txn = store.begin().await?;
    if stored_profile(&txn).await?.is_some() {
        txn.rollback().await?;
        debug!("Store already initialised");
        return Ok(SeedOutcome::AlreadyInitialized);
    }

    let profile = CompanyProfile::from(defaults);
    txn.update(company_record(&profile, Utc::now())).await?;

    let chart = default_chart();
    for account in &chart {
        txn.create(account_record(account)).await?;
    }
    append(
        &txn,
        AuditAction::Init,
        format!("Initialised store with {} accounts", chart.len()),
        None,
    )
    .await?;

    txn.commit().await?;
    info!(accounts = chart.len(), company = %profile.name, "Store initialised");
    Ok(SeedOutcome::Seeded {
        accounts: chart.len(),
    })
}
