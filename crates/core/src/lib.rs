//! Core bookkeeping logic for Tally.
//!
//! This crate contains pure business logic with ZERO database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry bookkeeping: accounts, entries, validation, balances
//! - `reports` - Balance sheet, income statement, trial balance, ledger and journal

pub mod ledger;
pub mod reports;
