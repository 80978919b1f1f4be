//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::{self, CsvAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::plotters_chart::PlottersChart;
use crate::adapters::yahoo_adapter::YahooAdapter;
use crate::domain::config_validation::validate_forecast_config;
use crate::domain::error::StockcastError;
use crate::domain::moving_average::{compute_moving_average, DEFAULT_WINDOW};
use crate::domain::price_series::PriceSeries;
use crate::domain::regression::{forecast_trend, ForecastReport, DEFAULT_TEST_FRACTION};
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataPort;

pub const DEFAULT_TICKER: &str = "NVDA";
pub const DEFAULT_START_DATE: &str = "2022-01-01";
pub const DEFAULT_END_DATE: &str = "2023-01-01";
pub const DEFAULT_OUTPUT: &str = "nvidia_stock_price_prediction.png";

const PREVIEW_ROWS: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "stockcast", about = "Stock price trend forecaster")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the forecast pipeline and render the comparison chart
    Forecast {
        #[arg(long)]
        ticker: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Moving-average window in trading days
        #[arg(long)]
        window: Option<usize>,
        /// Load prices from a saved CSV file instead of the live provider
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Chart output path
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Fetch a date range and save it as CSV for later forecast runs
    Fetch {
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show the resolved date range and record count for a source
    Info {
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Inspect a saved CSV file instead of the live provider
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Forecast {
            ticker,
            start,
            end,
            window,
            csv,
            output,
            config,
        } => run_forecast(
            ticker.as_deref(),
            start.as_deref(),
            end.as_deref(),
            window,
            csv.as_deref(),
            output.as_deref(),
            config.as_deref(),
        ),
        Command::Fetch {
            ticker,
            start,
            end,
            output,
        } => run_fetch(ticker.as_deref(), start.as_deref(), end.as_deref(), &output),
        Command::Info {
            ticker,
            start,
            end,
            csv,
        } => run_info(
            ticker.as_deref(),
            start.as_deref(),
            end.as_deref(),
            csv.as_deref(),
        ),
    }
}

/// Fully resolved inputs for one forecast run.
#[derive(Debug, Clone)]
pub struct ForecastParams {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub window: usize,
    pub test_fraction: f64,
    pub output: PathBuf,
}

fn parse_date(value: &str, key: &str) -> Result<NaiveDate, StockcastError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| StockcastError::ConfigInvalid {
        section: "forecast".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

/// Resolve forecast parameters: CLI flag over config value over default.
pub fn build_forecast_params(
    config: Option<&dyn ConfigPort>,
    ticker: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    window: Option<usize>,
    output: Option<&Path>,
) -> Result<ForecastParams, StockcastError> {
    let from_config = |key: &str| config.and_then(|c| c.get_string("forecast", key));

    let ticker = ticker
        .map(str::to_uppercase)
        .or_else(|| from_config("ticker").map(|t| t.to_uppercase()))
        .unwrap_or_else(|| DEFAULT_TICKER.to_string());

    let start_str = start
        .map(str::to_string)
        .or_else(|| from_config("start_date"))
        .unwrap_or_else(|| DEFAULT_START_DATE.to_string());
    let end_str = end
        .map(str::to_string)
        .or_else(|| from_config("end_date"))
        .unwrap_or_else(|| DEFAULT_END_DATE.to_string());

    let start_date = parse_date(&start_str, "start_date")?;
    let end_date = parse_date(&end_str, "end_date")?;
    if start_date >= end_date {
        return Err(StockcastError::InvalidDateRange {
            start: start_date.to_string(),
            end: end_date.to_string(),
        });
    }

    let window = match window {
        Some(w) => w,
        None => config
            .map(|c| c.get_int("forecast", "window", DEFAULT_WINDOW as i64))
            .unwrap_or(DEFAULT_WINDOW as i64)
            .max(0) as usize,
    };
    if window == 0 {
        return Err(StockcastError::InvalidWindow { window });
    }

    let test_fraction = config
        .map(|c| c.get_double("forecast", "test_fraction", DEFAULT_TEST_FRACTION))
        .unwrap_or(DEFAULT_TEST_FRACTION);

    let output = output
        .map(Path::to_path_buf)
        .or_else(|| from_config("output").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    Ok(ForecastParams {
        ticker,
        start_date,
        end_date,
        window,
        test_fraction,
        output,
    })
}

fn load_config(path: &Path) -> Result<FileConfigAdapter, StockcastError> {
    let adapter =
        FileConfigAdapter::from_file(path).map_err(|e| StockcastError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
    validate_forecast_config(&adapter)?;
    Ok(adapter)
}

fn print_preview(series: &PriceSeries) {
    println!("First rows of {}:", series.ticker);
    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "date", "open", "high", "low", "close", "volume"
    );
    for bar in series.bars.iter().take(PREVIEW_ROWS) {
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12}",
            bar.date.to_string(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        );
    }
}

/// Loader -> moving average -> trend forecast -> chart, in order, over one
/// mutable series.
pub fn run_forecast_pipeline(
    data_port: &dyn MarketDataPort,
    chart_port: &dyn ChartPort,
    params: &ForecastParams,
) -> Result<ForecastReport, StockcastError> {
    // Stage 1: Load data
    eprintln!(
        "Fetching {} from {} to {}",
        params.ticker, params.start_date, params.end_date
    );
    let mut series =
        data_port.fetch_prices(&params.ticker, params.start_date, params.end_date)?;

    if series.is_empty() {
        return Err(StockcastError::NoData {
            ticker: params.ticker.clone(),
        });
    }
    eprintln!("Loaded {} records", series.len());
    print_preview(&series);

    // Stage 2: Moving average
    compute_moving_average(&mut series, params.window)?;

    // Stage 3: Trend forecast
    let report = forecast_trend(&mut series, params.test_fraction)?;
    eprintln!(
        "Trend fit on {} records, evaluated on {}",
        report.train_len, report.test_len
    );
    println!("Linear regression mean squared error: {:.6}", report.mse);

    // Stage 4: Chart
    chart_port.render(&series, params.window, &params.output)?;
    println!("Chart written to: {}", params.output.display());

    Ok(report)
}

fn run_forecast(
    ticker: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    window: Option<usize>,
    csv: Option<&Path>,
    output: Option<&Path>,
    config_path: Option<&Path>,
) -> ExitCode {
    let config = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(adapter) => Some(adapter),
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            }
        }
        None => None,
    };

    let params = match build_forecast_params(
        config.as_ref().map(|c| c as &dyn ConfigPort),
        ticker,
        start,
        end,
        window,
        output,
    ) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let chart_port = PlottersChart::new();
    let result = match csv {
        Some(path) => {
            let data_port = CsvAdapter::new(path.to_path_buf());
            run_forecast_pipeline(&data_port, &chart_port, &params)
        }
        None => {
            let data_port = YahooAdapter::new();
            run_forecast_pipeline(&data_port, &chart_port, &params)
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_fetch(
    ticker: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    output: &Path,
) -> ExitCode {
    let params = match build_forecast_params(None, ticker, start, end, None, None) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = YahooAdapter::new();
    let result = data_port
        .fetch_prices(&params.ticker, params.start_date, params.end_date)
        .and_then(|series| {
            if series.is_empty() {
                return Err(StockcastError::NoData {
                    ticker: params.ticker.clone(),
                });
            }
            csv_adapter::save_series(&series, output)?;
            Ok(series.len())
        });

    match result {
        Ok(count) => {
            eprintln!("Saved {} records to {}", count, output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(
    ticker: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    csv: Option<&Path>,
) -> ExitCode {
    let params = match build_forecast_params(None, ticker, start, end, None, None) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let result = match csv {
        Some(path) => CsvAdapter::new(path.to_path_buf()).fetch_prices(
            &params.ticker,
            params.start_date,
            params.end_date,
        ),
        None => {
            YahooAdapter::new().fetch_prices(&params.ticker, params.start_date, params.end_date)
        }
    };

    match result {
        Ok(series) => match series.date_range() {
            Some((first, last)) => {
                println!(
                    "{}: {} records, {} to {}",
                    series.ticker,
                    series.len(),
                    first,
                    last
                );
                ExitCode::SUCCESS
            }
            None => {
                let e = StockcastError::NoData {
                    ticker: params.ticker.clone(),
                };
                eprintln!("error: {e}");
                (&e).into()
            }
        },
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
