//! Trailing moving average of closing prices.
//!
//! MA(w)[i] = (C[i-w+1] + ... + C[i]) / w
//! Warmup: first (w-1) positions are undefined.

use crate::domain::error::StockcastError;
use crate::domain::price_series::PriceSeries;

pub const DEFAULT_WINDOW: usize = 5;

/// Fill the series' moving-average column with the trailing mean of close
/// over `window` bars inclusive of the current one. O(n) sliding sum.
///
/// A window longer than the series leaves every position undefined; a zero
/// window is rejected.
pub fn compute_moving_average(
    series: &mut PriceSeries,
    window: usize,
) -> Result<(), StockcastError> {
    if window == 0 {
        return Err(StockcastError::InvalidWindow { window });
    }

    let mut column = vec![None; series.len()];
    let mut window_sum: f64 = 0.0;

    for (i, close) in series.closes().enumerate() {
        window_sum += close;
        if i >= window {
            window_sum -= series.bars[i - window].close;
        }
        if i + 1 >= window {
            column[i] = Some(window_sum / window as f64);
        }
    }

    series.moving_avg = column;
    Ok(())
}
