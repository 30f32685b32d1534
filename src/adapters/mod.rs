//! Concrete adapter implementations for ports, plus presentation.

pub mod csv_adapter;
pub mod currency;
pub mod file_config_adapter;
pub mod static_data_adapter;
pub mod text_report;
#[cfg(feature = "web")]
pub mod web;
