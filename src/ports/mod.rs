//! Port traits separating the pipeline from its adapters.

pub mod config_port;
pub mod data_port;
pub mod chart_port;
