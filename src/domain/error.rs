//! Domain error types.

use crate::ports::quote_port::QuoteError;
use chrono::NaiveDate;

/// Top-level error type for annualize.
#[derive(Debug, thiserror::Error)]
pub enum AnnualizeError {
    #[error("invalid holding period for {symbol}: purchased {purchase_date}, sold {sell_date}")]
    InvalidWindow {
        symbol: String,
        purchase_date: NaiveDate,
        sell_date: NaiveDate,
    },

    #[error("invalid buy price for {symbol}: {price}")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("quotes unavailable for {symbol}: {source}")]
    QuoteUnavailable { symbol: String, source: QuoteError },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade file error in {file}: {reason}")]
    TradeFile { file: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&AnnualizeError> for std::process::ExitCode {
    fn from(err: &AnnualizeError) -> Self {
        let code: u8 = match err {
            AnnualizeError::Io(_) => 1,
            AnnualizeError::ConfigParse { .. }
            | AnnualizeError::ConfigMissing { .. }
            | AnnualizeError::ConfigInvalid { .. } => 2,
            AnnualizeError::TradeFile { .. } => 3,
            AnnualizeError::QuoteUnavailable { .. } => 4,
            AnnualizeError::InvalidWindow { .. } | AnnualizeError::InvalidPrice { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
