//! Concrete adapter implementations for ports.

pub mod yahoo_adapter;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod plotters_chart;
