//! Daily price series with derived analytic columns.

use chrono::NaiveDate;

/// One trading day of OHLCV data. Close is the column the pipeline operates on.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// A date-sorted series of daily bars plus the columns derived by the
/// pipeline stages. `None` marks positions where a derived value is
/// undefined: the moving-average warmup, and every position outside the
/// evaluation slice for the forecast.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub ticker: String,
    pub bars: Vec<PriceBar>,
    pub moving_avg: Vec<Option<f64>>,
    pub forecast: Vec<Option<f64>>,
}

impl PriceSeries {
    /// Build a series from bars in any order. Bars are sorted ascending by
    /// date; derived columns start out all-undefined.
    pub fn new(ticker: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        let len = bars.len();
        Self {
            ticker: ticker.into(),
            bars,
            moving_avg: vec![None; len],
            forecast: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }

    /// First and last date, when the series is non-empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}
