//! Store error types.

use sea_orm::{DbErr, SqlErr};
use tally_core::ledger::LedgerError;
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened.
    #[error("failed to open store: {0}")]
    Open(#[source] DbErr),

    /// A schema upgrade step failed; nothing from the upgrade was kept.
    #[error("failed to apply schema step {version}: {source}")]
    Upgrade {
        /// Version the failed step would have produced.
        version: u32,
        /// Underlying failure.
        #[source]
        source: DbErr,
    },

    /// The requested schema version is newer than any known step.
    #[error("schema version {requested} is not supported (latest is {latest})")]
    UnsupportedVersion {
        /// Requested version.
        requested: u32,
        /// Latest known version.
        latest: u32,
    },

    /// A record with the same key already exists.
    #[error("duplicate key in {collection}: {detail}")]
    DuplicateKey {
        /// Collection (table) written to.
        collection: String,
        /// Database message.
        detail: String,
    },

    /// A key or key range does not fit the index it targets.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Any other read or write failure.
    #[error("store unavailable: {0}")]
    Unavailable(#[from] DbErr),
}

impl StoreError {
    /// Create an invalid key error.
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Classifies a failed write against `collection`.
    #[must_use]
    pub fn from_write(collection: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::DuplicateKey {
                collection: collection.to_string(),
                detail,
            },
            _ => Self::Unavailable(err),
        }
    }

    /// Returns true if the store cannot be used at all.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Open(_) | Self::Upgrade { .. } | Self::UnsupportedVersion { .. }
        )
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey { collection, detail } => {
                Self::DuplicateKey(format!("{collection}: {detail}"))
            }
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}
