//! Yahoo Finance chart-API data adapter.
//!
//! Blocking GET against the v8 chart endpoint; the JSON envelope is parsed
//! with serde. Rows without a close are dropped at this boundary.

use crate::domain::error::StockcastError;
use crate::domain::price_series::{PriceBar, PriceSeries};
use crate::ports::data_port::MarketDataPort;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

pub struct YahooAdapter {
    base_url: String,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooAdapter {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    fn request_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            self.base_url,
            ticker,
            midnight_timestamp(start),
            midnight_timestamp(end),
        )
    }
}

fn midnight_timestamp(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

/// Parse a chart-API response body into a date-sorted series. Rows with a
/// missing close are skipped; an empty result set yields an empty series.
pub fn parse_chart_response(
    body: &str,
    ticker: &str,
) -> Result<PriceSeries, StockcastError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| StockcastError::DataFormat {
            reason: format!("chart response parse error: {}", e),
        })?;

    if let Some(error) = response.chart.error {
        return Err(StockcastError::Fetch {
            ticker: ticker.to_string(),
            reason: format!("{}: {}", error.code, error.description),
        });
    }

    let results = response.chart.result.unwrap_or_default();
    let Some(data) = results.first() else {
        return Ok(PriceSeries::new(ticker, Vec::new()));
    };

    let Some(quote) = data.indicators.quote.first() else {
        return Ok(PriceSeries::new(ticker, Vec::new()));
    };

    let mut bars = Vec::with_capacity(data.timestamp.len());
    for (i, &ts) in data.timestamp.iter().enumerate() {
        let Some(close) = quote.close.get(i).copied().flatten() else {
            continue;
        };

        let date = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| StockcastError::DataFormat {
                reason: format!("timestamp {} out of range", ts),
            })?
            .date_naive();

        bars.push(PriceBar {
            date,
            open: quote.open.get(i).copied().flatten().unwrap_or(close),
            high: quote.high.get(i).copied().flatten().unwrap_or(close),
            low: quote.low.get(i).copied().flatten().unwrap_or(close),
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
        });
    }

    Ok(PriceSeries::new(ticker, bars))
}

impl MarketDataPort for YahooAdapter {
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

        let url = self.request_url(ticker, start_date, end_date);

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| StockcastError::Fetch {
                ticker: ticker.to_string(),
                reason: e.to_string(),
            })?;

        let body = client
            .get(&url)
            .send()
            .and_then(|r| r.text())
            .map_err(|e| StockcastError::Fetch {
                ticker: ticker.to_string(),
                reason: e.to_string(),
            })?;

        parse_chart_response(&body, ticker)
    }
}
