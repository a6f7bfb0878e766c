//! Repository abstractions for data access.
//!
//! Repositories hold a [`Store`](crate::store::Store) handle and run each
//! operation in its own transaction, hiding the `SeaORM` details from the
//! front ends.

pub mod account;
pub mod audit;
pub mod company;
pub mod ledger;
pub mod report;

pub(crate) mod convert;

pub use account::AccountRepository;
pub use audit::AuditRepository;
pub use company::CompanyRepository;
pub use ledger::LedgerRepository;
pub use report::ReportRepository;
