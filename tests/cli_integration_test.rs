//! CLI parameter resolution and config handling tests.
//!
//! Tests cover:
//! - Defaults when no config or flags are given
//! - INI config values and flag-over-config precedence
//! - Rejection of invalid dates, ranges, and windows
//! - Config validation with real INI files on disk

mod common;

use common::date;
use std::io::Write;
use std::path::{Path, PathBuf};
use stockcast::adapters::file_config_adapter::FileConfigAdapter;
use stockcast::cli::{
    build_forecast_params, DEFAULT_OUTPUT, DEFAULT_TICKER,
};
use stockcast::domain::config_validation::validate_forecast_config;
use stockcast::domain::error::StockcastError;
use stockcast::ports::config_port::ConfigPort;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[forecast]
ticker = amd
start_date = 2021-06-01
end_date = 2021-12-31
window = 10
test_fraction = 0.25
output = amd_forecast.png
"#;

mod defaults {
    use super::*;

    #[test]
    fn no_config_no_flags_uses_documented_defaults() {
        let params = build_forecast_params(None, None, None, None, None, None).unwrap();

        assert_eq!(params.ticker, DEFAULT_TICKER);
        assert_eq!(params.start_date, date(2022, 1, 1));
        assert_eq!(params.end_date, date(2023, 1, 1));
        assert_eq!(params.window, 5);
        assert!((params.test_fraction - 0.2).abs() < f64::EPSILON);
        assert_eq!(params.output, PathBuf::from(DEFAULT_OUTPUT));
    }
}

mod config_resolution {
    use super::*;

    #[test]
    fn config_values_override_defaults() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let params =
            build_forecast_params(Some(&adapter), None, None, None, None, None).unwrap();

        assert_eq!(params.ticker, "AMD");
        assert_eq!(params.start_date, date(2021, 6, 1));
        assert_eq!(params.end_date, date(2021, 12, 31));
        assert_eq!(params.window, 10);
        assert!((params.test_fraction - 0.25).abs() < f64::EPSILON);
        assert_eq!(params.output, PathBuf::from("amd_forecast.png"));
    }

    #[test]
    fn flags_override_config() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let params = build_forecast_params(
            Some(&adapter),
            Some("nvda"),
            Some("2022-02-01"),
            Some("2022-11-30"),
            Some(7),
            Some(Path::new("custom.png")),
        )
        .unwrap();

        assert_eq!(params.ticker, "NVDA");
        assert_eq!(params.start_date, date(2022, 2, 1));
        assert_eq!(params.end_date, date(2022, 11, 30));
        assert_eq!(params.window, 7);
        assert_eq!(params.output, PathBuf::from("custom.png"));
    }

    #[test]
    fn ticker_is_uppercased() {
        let params =
            build_forecast_params(None, Some("nvda"), None, None, None, None).unwrap();
        assert_eq!(params.ticker, "NVDA");
    }
}

mod rejected_inputs {
    use super::*;

    #[test]
    fn malformed_start_date_flag() {
        let err = build_forecast_params(None, None, Some("01/02/2022"), None, None, None)
            .unwrap_err();
        assert!(matches!(err, StockcastError::ConfigInvalid { .. }));
    }

    #[test]
    fn inverted_date_range() {
        let err = build_forecast_params(
            None,
            None,
            Some("2023-01-01"),
            Some("2022-01-01"),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, StockcastError::InvalidDateRange { .. }));
    }

    #[test]
    fn equal_dates_are_an_empty_range() {
        let err = build_forecast_params(
            None,
            None,
            Some("2022-01-01"),
            Some("2022-01-01"),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, StockcastError::InvalidDateRange { .. }));
    }

    #[test]
    fn zero_window_flag() {
        let err =
            build_forecast_params(None, None, None, None, Some(0), None).unwrap_err();
        assert!(matches!(err, StockcastError::InvalidWindow { window: 0 }));
    }

    #[test]
    fn negative_config_window_is_rejected() {
        let adapter = FileConfigAdapter::from_string("[forecast]\nwindow = -4\n").unwrap();
        let err = build_forecast_params(Some(&adapter), None, None, None, None, None)
            .unwrap_err();
        assert!(matches!(err, StockcastError::InvalidWindow { .. }));
    }
}

mod config_files_on_disk {
    use super::*;

    #[test]
    fn valid_ini_loads_and_validates() {
        let file = write_temp_ini(VALID_INI);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();

        validate_forecast_config(&adapter).unwrap();
        assert_eq!(
            adapter.get_string("forecast", "ticker"),
            Some("amd".to_string())
        );
    }

    #[test]
    fn invalid_fraction_fails_validation() {
        let file = write_temp_ini("[forecast]\ntest_fraction = 1.5\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();

        let err = validate_forecast_config(&adapter).unwrap_err();
        assert!(matches!(
            err,
            StockcastError::ConfigInvalid { ref key, .. } if key == "test_fraction"
        ));
    }

    #[test]
    fn inverted_config_dates_fail_validation() {
        let file =
            write_temp_ini("[forecast]\nstart_date = 2023-01-01\nend_date = 2022-01-01\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();

        assert!(validate_forecast_config(&adapter).is_err());
    }
}
