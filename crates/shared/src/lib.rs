//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Money type with fixed two-decimal precision
//! - Typed IDs for type-safe record references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CompanyDefaults, DatabaseConfig, LoggingConfig};
pub use error::{AppError, AppResult};
