//! Configuration validation.
//!
//! Validates all forecast config fields before the pipeline runs.

use crate::domain::error::StockcastError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_forecast_config(config: &dyn ConfigPort) -> Result<(), StockcastError> {
    validate_window(config)?;
    validate_test_fraction(config)?;
    validate_dates(config)?;
    Ok(())
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), StockcastError> {
    let value = config.get_int("forecast", "window", 5);
    if value < 1 {
        return Err(StockcastError::ConfigInvalid {
            section: "forecast".to_string(),
            key: "window".to_string(),
            reason: "window must be a positive integer".to_string(),
        });
    }
    Ok(())
}

fn validate_test_fraction(config: &dyn ConfigPort) -> Result<(), StockcastError> {
    let value = config.get_double("forecast", "test_fraction", 0.2);
    if value <= 0.0 || value >= 1.0 {
        return Err(StockcastError::ConfigInvalid {
            section: "forecast".to_string(),
            key: "test_fraction".to_string(),
            reason: "test_fraction must lie strictly between 0 and 1".to_string(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), StockcastError> {
    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(StockcastError::ConfigInvalid {
                section: "forecast".to_string(),
                key: "start_date".to_string(),
                reason: "start_date must precede end_date".to_string(),
            });
        }
    }
    Ok(())
}

fn parse_date(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, StockcastError> {
    match config.get_string("forecast", key) {
        Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| StockcastError::ConfigInvalid {
                section: "forecast".to_string(),
                key: key.to_string(),
                reason: "invalid date format (expected YYYY-MM-DD)".to_string(),
            }),
        None => Ok(None),
    }
}
