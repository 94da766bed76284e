//! Concrete adapter implementations for ports.

pub mod tiingo_adapter;
pub mod alphavantage_adapter;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod trade_file_adapter;
