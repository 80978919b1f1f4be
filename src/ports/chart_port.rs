//! Chart rendering port trait.

use crate::domain::error::StockcastError;
use crate::domain::price_series::PriceSeries;
use std::path::Path;

/// Port for persisting the comparison chart of actual close, moving
/// average, and trend forecast.
pub trait ChartPort {
    fn render(
        &self,
        series: &PriceSeries,
        window: usize,
        output_path: &Path,
    ) -> Result<(), StockcastError>;
}
