//! crosstrader — moving-average crossover trading engine with a paper
//! portfolio ledger.
//!
//! Hexagonal architecture: core logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
