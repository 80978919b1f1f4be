//! CSV file data adapter.
//!
//! Reads a previously saved price table (header
//! `date,open,high,low,close,volume`) as an alternative to the live fetch,
//! and writes the same layout for the `fetch` subcommand.

use crate::domain::error::StockcastError;
use crate::domain::price_series::{PriceBar, PriceSeries};
use crate::ports::data_port::MarketDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, StockcastError>
where
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| StockcastError::DataFormat {
            reason: format!("missing {} column", name),
        })?
        .parse()
        .map_err(|e| StockcastError::DataFormat {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl MarketDataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, StockcastError> {
        if start_date >= end_date {
            return Err(StockcastError::InvalidDateRange {
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StockcastError::Fetch {
            ticker: ticker.to_string(),
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StockcastError::DataFormat {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| StockcastError::DataFormat {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                StockcastError::DataFormat {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            bars.push(PriceBar {
                date,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
            });
        }

        Ok(PriceSeries::new(ticker, bars))
    }
}

/// Write a series back out in the layout `fetch_prices` reads.
pub fn save_series(series: &PriceSeries, path: &Path) -> Result<(), StockcastError> {
    let mut wtr = csv::Writer::from_path(path).map_err(csv_io_error)?;

    wtr.write_record(["date", "open", "high", "low", "close", "volume"])
        .map_err(csv_io_error)?;

    for bar in &series.bars {
        wtr.write_record([
            bar.date.to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ])
        .map_err(csv_io_error)?;
    }

    wtr.flush()?;
    Ok(())
}

fn csv_io_error(e: csv::Error) -> StockcastError {
    StockcastError::DataFormat {
        reason: format!("CSV write error: {}", e),
    }
}
