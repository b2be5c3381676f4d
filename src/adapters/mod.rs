//! Concrete adapter implementations for ports.

pub mod console_report;
pub mod csv_market_data;
pub mod file_config_adapter;
pub mod paper_execution;
