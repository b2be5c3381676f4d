//! Core domain types and logic.

pub mod candle;
pub mod config_validation;
pub mod engine;
pub mod error;
pub mod holding;
pub mod ledger;
pub mod policy;
pub mod signal;
pub mod sma;
pub mod valuation;
