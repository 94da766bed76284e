//! Quote source port trait.

use crate::domain::candle::Candle;
use chrono::NaiveDate;

/// Failure modes at the quote source boundary.
///
/// A provider returning zero bars is not a failure: adapters signal that case
/// with an empty `Ok` vector, and the aggregators exclude the trade.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuoteError {
    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("network error: {0}")]
    Network(String),
}

/// Historical daily quote source (Tiingo, Alphavantage, local CSV).
///
/// `Send + Sync` so one adapter instance can serve the parallel engine's
/// worker threads.
pub trait QuotePort: Send + Sync + std::fmt::Debug {
    /// Fetch daily candles for `symbol` over `[from, to]`, ascending by date.
    fn fetch_daily(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, QuoteError>;
}
