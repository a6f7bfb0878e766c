//! Audit trail types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_shared::types::{AuditId, EntryId};

/// What an audit record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// An entry was created.
    CreateEntry,
    /// An entry was deleted.
    DeleteEntry,
    /// Company profile or chart of accounts changed.
    ConfigChange,
    /// The store was initialised.
    Init,
    /// Free-form system message.
    System,
}

impl AuditAction {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateEntry => "create_entry",
            Self::DeleteEntry => "delete_entry",
            Self::ConfigChange => "config_change",
            Self::Init => "init",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "create_entry" => Ok(Self::CreateEntry),
            "delete_entry" => Ok(Self::DeleteEntry),
            "config_change" => Ok(Self::ConfigChange),
            "init" => Ok(Self::Init),
            "system" => Ok(Self::System),
            _ => Err(format!("Unknown audit action: {s}")),
        }
    }
}

/// A stored audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Store-assigned id.
    pub id: AuditId,
    /// What happened.
    pub action: AuditAction,
    /// Related entry; may no longer exist.
    pub entry_id: Option<EntryId>,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// Human-readable description.
    pub details: String,
}

/// Outcome of the audit insert that accompanies a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AuditStatus {
    /// The audit record was written.
    Logged(AuditId),
    /// The write committed but its audit record could not be stored.
    Failed(String),
}

impl AuditStatus {
    /// Returns true if the audit record was written.
    #[must_use]
    pub const fn is_logged(&self) -> bool {
        matches!(self, Self::Logged(_))
    }
}

/// A committed write together with the fate of its audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recorded<T> {
    /// What was written.
    pub value: T,
    /// Audit outcome.
    pub audit: AuditStatus,
}

impl<T> Recorded<T> {
    /// Drops the audit outcome.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Audit details for a created entry.
#[must_use]
pub fn created_entry_details(id: EntryId, concept: &str) -> String {
    format!("Entry #{id}: {concept}")
}

/// Audit details for a deleted entry.
#[must_use]
pub fn deleted_entry_details(id: EntryId, concept: &str) -> String {
    format!("Deleted entry #{id}: {concept}")
}
