//! Core domain types and pipeline logic.

pub mod price_series;
pub mod moving_average;
pub mod regression;
pub mod config_validation;
pub mod error;
