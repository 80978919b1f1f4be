//! Linear-regression trend forecast over a chronological train/test split.
//!
//! Each bar gets an implicit 0-based time index in date order. The earlier
//! slice trains an ordinary least-squares line (index -> close); the trailing
//! slice is held out, predicted, and scored by mean squared error.

use crate::domain::error::StockcastError;
use crate::domain::price_series::PriceSeries;

pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Fewer bars than this cannot be split into a two-point training slice and
/// a non-empty evaluation slice.
pub const MIN_BARS_FOR_FIT: usize = 3;

/// Fitted OLS line y = slope * x + intercept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearModel {
    /// Least-squares fit of y against x. Requires at least two points with
    /// non-zero variance in x.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.len() < 2 || xs.len() != ys.len() {
            return None;
        }

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            cov += (x - mean_x) * (y - mean_y);
            var_x += (x - mean_x) * (x - mean_x);
        }

        if var_x == 0.0 {
            return None;
        }

        let slope = cov / var_x;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Outcome of a forecast run: the fitted line, the split sizes, and the mean
/// squared error over the evaluation slice.
#[derive(Debug, Clone, Copy)]
pub struct ForecastReport {
    pub model: LinearModel,
    pub train_len: usize,
    pub test_len: usize,
    pub mse: f64,
}

/// Index of the first evaluation bar: the trailing ceil(n * test_fraction)
/// bars are held out, matching an unshuffled 80/20 split at the default
/// fraction.
pub fn split_point(len: usize, test_fraction: f64) -> usize {
    let test_len = (len as f64 * test_fraction).ceil() as usize;
    len - test_len.min(len)
}

/// Fit the trend on the training slice and write predictions into the
/// series' forecast column at evaluation-slice positions only.
pub fn forecast_trend(
    series: &mut PriceSeries,
    test_fraction: f64,
) -> Result<ForecastReport, StockcastError> {
    let n = series.len();
    if n < MIN_BARS_FOR_FIT {
        return Err(StockcastError::InsufficientData {
            ticker: series.ticker.clone(),
            records: n,
            minimum: MIN_BARS_FOR_FIT,
        });
    }

    let split = split_point(n, test_fraction);
    if split < 2 {
        return Err(StockcastError::InsufficientData {
            ticker: series.ticker.clone(),
            records: split,
            minimum: 2,
        });
    }

    let xs: Vec<f64> = (0..split).map(|i| i as f64).collect();
    let ys: Vec<f64> = series.closes().take(split).collect();

    let model =
        LinearModel::fit(&xs, &ys).ok_or_else(|| StockcastError::InsufficientData {
            ticker: series.ticker.clone(),
            records: split,
            minimum: 2,
        })?;

    let mut column = vec![None; n];
    let mut squared_error = 0.0;
    for i in split..n {
        let predicted = model.predict(i as f64);
        let actual = series.bars[i].close;
        squared_error += (predicted - actual) * (predicted - actual);
        column[i] = Some(predicted);
    }

    let test_len = n - split;
    series.forecast = column;

    Ok(ForecastReport {
        model,
        train_len: split,
        test_len,
        mse: squared_error / test_len as f64,
    })
}
