//! Financial report generation.
//!
//! This module provides pure business logic for composing reports:
//! - Balance Sheet
//! - Income Statement
//! - Trial Balance
//! - General Ledger
//! - Journal

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
