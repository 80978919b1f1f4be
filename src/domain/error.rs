//! Domain error type.

/// Top-level error type for stockcast.
#[derive(Debug, thiserror::Error)]
pub enum StockcastError {
    #[error("fetch error for {ticker}: {reason}")]
    Fetch { ticker: String, reason: String },

    #[error("malformed data: {reason}")]
    DataFormat { reason: String },

    #[error("invalid date range: {start} must precede {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("invalid moving-average window: {window}")]
    InvalidWindow { window: usize },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {ticker} in the requested range")]
    NoData { ticker: String },

    #[error("insufficient data for {ticker}: have {records} records, need {minimum}")]
    InsufficientData {
        ticker: String,
        records: usize,
        minimum: usize,
    },

    #[error("chart render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockcastError> for std::process::ExitCode {
    fn from(err: &StockcastError) -> Self {
        let code: u8 = match err {
            StockcastError::Io(_) | StockcastError::Render { .. } => 1,
            StockcastError::ConfigParse { .. } | StockcastError::ConfigInvalid { .. } => 2,
            StockcastError::Fetch { .. } | StockcastError::DataFormat { .. } => 3,
            StockcastError::InvalidDateRange { .. } | StockcastError::InvalidWindow { .. } => 4,
            StockcastError::NoData { .. } | StockcastError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = StockcastError::InsufficientData {
            ticker: "NVDA".into(),
            records: 2,
            minimum: 3,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data for NVDA: have 2 records, need 3"
        );

        let err = StockcastError::InvalidDateRange {
            start: "2023-01-01".into(),
            end: "2022-01-01".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date range: 2023-01-01 must precede 2022-01-01"
        );
    }
}
