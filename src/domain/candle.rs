//! Daily price candle representation.

use chrono::NaiveDate;

/// One trading day's OHLC quote for a symbol.
///
/// Quote adapters emit these ascending by date. `low <= open,close <= high`
/// is assumed from the provider, not validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}
