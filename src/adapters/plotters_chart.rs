//! PNG chart adapter built on plotters.
//!
//! Draws close, moving average, and trend forecast as line series over a
//! shared date axis, with legend and grid, and writes the result as a PNG.

use crate::domain::error::StockcastError;
use crate::domain::price_series::PriceSeries;
use crate::ports::chart_port::ChartPort;
use plotters::prelude::*;
use std::path::Path;

const CHART_WIDTH: u32 = 1280;
const CHART_HEIGHT: u32 = 720;

pub struct PlottersChart;

impl PlottersChart {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlottersChart {
    fn default() -> Self {
        Self::new()
    }
}

fn render_error(e: impl std::fmt::Display) -> StockcastError {
    StockcastError::Render {
        reason: e.to_string(),
    }
}

impl ChartPort for PlottersChart {
    fn render(
        &self,
        series: &PriceSeries,
        window: usize,
        output_path: &Path,
    ) -> Result<(), StockcastError> {
        let Some((first_date, last_date)) = series.date_range() else {
            return Err(StockcastError::Render {
                reason: "no data to plot".to_string(),
            });
        };

        let min_price = series.closes().fold(f64::INFINITY, f64::min);
        let max_price = series.closes().fold(f64::NEG_INFINITY, f64::max);
        // Headroom so the extremes do not sit on the frame.
        let margin = ((max_price - min_price) * 0.05).max(1.0);

        let root = BitMapBackend::new(output_path, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let title = format!("{} Stock Price Prediction", series.ticker);
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(
                first_date..last_date,
                (min_price - margin)..(max_price + margin),
            )
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Price (USD)")
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(LineSeries::new(
                series.bars.iter().map(|b| (b.date, b.close)),
                &BLUE,
            ))
            .map_err(render_error)?
            .label("Actual Prices")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        chart
            .draw_series(LineSeries::new(
                series
                    .bars
                    .iter()
                    .zip(&series.moving_avg)
                    .filter_map(|(b, v)| v.map(|value| (b.date, value))),
                &GREEN,
            ))
            .map_err(render_error)?
            .label(format!("Moving Average (window={})", window))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &GREEN));

        chart
            .draw_series(LineSeries::new(
                series
                    .bars
                    .iter()
                    .zip(&series.forecast)
                    .filter_map(|(b, v)| v.map(|value| (b.date, value))),
                &RED,
            ))
            .map_err(render_error)?
            .label("Linear Regression Prediction")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
        Ok(())
    }
}
