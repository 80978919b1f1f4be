#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use stockcast::domain::error::StockcastError;
pub use stockcast::domain::price_series::{PriceBar, PriceSeries};
use stockcast::ports::chart_port::ChartPort;
use stockcast::ports::data_port::MarketDataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockDataPort {
    fn fetch_prices(
        &self,
        ticker: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<PriceSeries, StockcastError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(StockcastError::Fetch {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(PriceSeries::new(
            ticker,
            self.data.get(ticker).cloned().unwrap_or_default(),
        ))
    }
}

/// Records every render call so tests can inspect what the pipeline handed
/// to the chart stage.
pub struct MockChartPort {
    pub calls: RefCell<Vec<(PriceSeries, usize, PathBuf)>>,
}

impl MockChartPort {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ChartPort for MockChartPort {
    fn render(
        &self,
        series: &PriceSeries,
        window: usize,
        output_path: &Path,
    ) -> Result<(), StockcastError> {
        self.calls
            .borrow_mut()
            .push((series.clone(), window, output_path.to_path_buf()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(day: &str, close: f64) -> PriceBar {
    PriceBar {
        date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

/// Consecutive daily bars starting at `start` with the given closes.
pub fn generate_bars(start: &str, closes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: start + chrono::Days::new(i as u64),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            volume: 1000,
        })
        .collect()
}
