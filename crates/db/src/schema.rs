//! Schema versioning.
//!
//! The schema version is the number of migration steps applied. Upgrades
//! run the missing steps in order inside one transaction, so a failed step
//! leaves the store exactly as it was.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};
use sea_orm_migration::MigratorTrait;
use serde::Serialize;
use tracing::{debug, info};

use crate::migration::Migrator;
use crate::store::StoreError;

/// Schema version this build expects.
pub const SCHEMA_VERSION: u32 = 3;

/// Versions before and after an upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaUpgrade {
    /// Version found.
    pub from: u32,
    /// Version left.
    pub to: u32,
}

impl SchemaUpgrade {
    /// Returns true when no step ran.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Number of migration steps known to this build.
#[must_use]
pub fn latest_version() -> u32 {
    u32::try_from(Migrator::migrations().len()).unwrap_or(u32::MAX)
}

/// Number of migration steps applied to `db`.
///
/// # Errors
///
/// `Open` if the migration table cannot be read.
pub async fn current_version<C: ConnectionTrait>(db: &C) -> Result<u32, StoreError> {
    let applied = Migrator::get_applied_migrations(db)
        .await
        .map_err(StoreError::Open)?;
    Ok(u32::try_from(applied.len()).unwrap_or(u32::MAX))
}

/// Applies every step above the current version, up to `target`.
///
/// Does nothing when the store is already at or past `target`.
///
/// # Errors
///
/// `UnsupportedVersion` if `target` is beyond the latest step, `Upgrade`
/// if a step fails (all steps of this call are rolled back).
pub async fn upgrade(db: &DatabaseConnection, target: u32) -> Result<SchemaUpgrade, StoreError> {
    let latest = latest_version();
    if target > latest {
        return Err(StoreError::UnsupportedVersion {
            requested: target,
            latest,
        });
    }

    let from = current_version(db).await?;
    if from >= target {
        debug!(version = from, "Schema up to date");
        return Ok(SchemaUpgrade { from, to: from });
    }

    let txn = db.begin().await.map_err(step_failed(from + 1))?;
    for version in from + 1..=target {
        Migrator::up(&txn, Some(1)).await.map_err(step_failed(version))?;
        debug!(version, "Schema step applied");
    }
    txn.commit().await.map_err(step_failed(target))?;

    info!(from, to = target, "Schema upgraded");
    Ok(SchemaUpgrade { from, to: target })
}

fn step_failed(version: u32) -> impl FnOnce(DbErr) -> StoreError {
    move |source| StoreError::Upgrade { version, source }
}
