//! Audit trail repository.
//!
//! Records are append-only. Writes made as part of another operation go
//! through [`record_in_savepoint`], so a failed audit insert never undoes the
//! operation it describes.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{EntityTrait, QueryOrder, QuerySelect};
use tally_core::ledger::{AuditAction, AuditRecord, AuditStatus, LedgerError};
use tally_shared::types::{AuditId, EntryId};
use tracing::warn;

use crate::entities::audit_log;
use crate::store::{KeyRange, SecondaryIndex, Store, StoreError, StoreTransaction};

/// Appends one record inside `txn`.
pub(crate) async fn append(
    txn: &StoreTransaction,
    action: AuditAction,
    details: String,
    entry_id: Option<EntryId>,
) -> Result<AuditId, StoreError> {
    let record = audit_log::ActiveModel {
        id: NotSet,
        action: Set(action.into()),
        entry_id: Set(entry_id.map(EntryId::into_inner)),
        timestamp: Set(Utc::now()),
        details: Set(details),
    };
    let model = txn.create(record).await?;
    Ok(AuditId::new(model.id))
}

/// Appends one record in a savepoint of `txn` and reports the outcome.
///
/// A failure rolls back the savepoint only and is logged.
pub(crate) async fn record_in_savepoint(
    txn: &StoreTransaction,
    action: AuditAction,
    details: String,
    entry_id: Option<EntryId>,
) -> AuditStatus {
    match append_nested(txn, action, details, entry_id).await {
        Ok(id) => AuditStatus::Logged(id),
        Err(err) => {
            warn!(%action, error = %err, "Audit record not written");
            AuditStatus::Failed(err.to_string())
        }
    }
}

async fn append_nested(
    txn: &StoreTransaction,
    action: AuditAction,
    details: String,
    entry_id: Option<EntryId>,
) -> Result<AuditId, StoreError> {
    let savepoint = txn.savepoint().await?;
    match append(&savepoint, action, details, entry_id).await {
        Ok(id) => {
            savepoint.commit().await?;
            Ok(id)
        }
        Err(err) => {
            savepoint.rollback().await?;
            Err(err)
        }
    }
}

/// Audit repository for appending and querying the trail.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    store: Store,
}

impl AuditRepository {
    /// Creates a new audit repository.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Appends a record in its own transaction.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the write fails.
    pub async fn log(
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

    /// Records that mention an entry, oldest first.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn for_entry(&self, id: EntryId) -> Result<Vec<AuditRecord>, LedgerError> {
        self.by_index(&audit_log::BY_ENTRY, KeyRange::only(id.into_inner()))
            .await
    }

    /// Records stamped within `[from, to]`, oldest first.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AuditRecord>, LedgerError> {
        self.by_index(&audit_log::BY_TIMESTAMP, KeyRange::between(from, to))
            .await
    }

    /// Records of one kind, oldest first.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn by_action(&self, action: AuditAction) -> Result<Vec<AuditRecord>, LedgerError> {
        self.by_index(&audit_log::BY_ACTION, KeyRange::only(action.as_str()))
            .await
    }

    /// The `limit` most recent records, newest first.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` if the read fails.
    pub async fn recent(&self, limit: u64) -> Result<Vec<AuditRecord>, LedgerError> {
        let txn = self.store.begin().await?;
        let models = audit_log::Entity::find()
            .order_by_desc(audit_log::Column::Id)
            .limit(limit)
            .all(txn.connection())
            .await
            .map_err(StoreError::from)?;
        txn.commit().await?;
        Ok(models.into_iter().map(AuditRecord::from).collect())
    }

    async fn by_index(
        &self,
        index: &SecondaryIndex<audit_log::Entity>,
        range: KeyRange,
    ) -> Result<Vec<AuditRecord>, LedgerError> {
        let txn = self.store.begin().await?;
        let models = txn.read_all_by_index(index, &range).await?;
        txn.commit().await?;
        Ok(models.into_iter().map(AuditRecord::from).collect())
    }
}
