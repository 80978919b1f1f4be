//! Market data access port trait.

use crate::domain::error::StockcastError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;

/// Provider abstraction for historical daily prices, so a file-backed or
/// mocked source can stand in for the live fetch.
pub trait MarketDataPort {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, StockcastError>;
}
