//! Core domain types and logic.

pub mod config_validation;
pub mod error;
pub mod holding;
pub mod money;
pub mod quote;
pub mod sector;
pub mod settings;
pub mod snapshot;
pub mod summary;
pub mod valuation;
