//! Entity re-exports.

pub use super::accounting_entries::Entity as AccountingEntries;
pub use super::audit_log::Entity as AuditLog;
pub use super::chart_of_accounts::Entity as ChartOfAccounts;
pub use super::company_config::Entity as CompanyConfig;
pub use super::entry_lines::Entity as EntryLines;
