//! Portfolio trade representation.

use chrono::NaiveDate;
use serde::Deserialize;

/// One recorded purchase of a symbol.
///
/// There is no sell date; the sell side is derived from the evaluation
/// window when returns are computed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trade {
    pub symbol: String,
    #[serde(rename = "purchaseDate")]
    pub purchase_date: NaiveDate,
}
