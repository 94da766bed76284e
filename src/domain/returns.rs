//! Annualized return calculation and result ordering.

use super::error::AnnualizeError;
use super::trade::Trade;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// Calendar-day year, not trading days.
const DAYS_PER_YEAR: f64 = 365.0;

/// Computed return for one trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualizedReturn {
    pub symbol: String,
    pub annualized_return: f64,
    pub total_return: f64,
}

/// Compound-growth extrapolation of a holding-period return to one year.
///
/// `total = (sell - buy) / buy`, `annualized = (1 + total)^(365/days) - 1`,
/// where `days` counts calendar days from purchase to sell. A non-positive
/// holding period or buy price is rejected rather than propagating NaN or
/// infinity into the result list.
///
/// Pure; safe to call from any worker thread.
pub fn calculate_annualized_return(
    trade: &Trade,
    sell_date: NaiveDate,
    buy_price: f64,
    sell_price: f64,
) -> Result<AnnualizedReturn, AnnualizeError> {
    if buy_price <= 0.0 {
        return Err(AnnualizeError::InvalidPrice {
            symbol: trade.symbol.clone(),
            price: buy_price,
        });
    }

    let days = (sell_date - trade.purchase_date).num_days();
    if days <= 0 {
        return Err(AnnualizeError::InvalidWindow {
            symbol: trade.symbol.clone(),
            purchase_date: trade.purchase_date,
            sell_date,
        });
    }

    let total_return = (sell_price - buy_price) / buy_price;
    let years = days as f64 / DAYS_PER_YEAR;
    let annualized_return = (1.0 + total_return).powf(1.0 / years) - 1.0;

    Ok(AnnualizedReturn {
        symbol: trade.symbol.clone(),
        annualized_return,
        total_return,
    })
}

/// Sort key for result lists: highest annualized return first.
///
/// Used with a stable sort, so equal returns keep their input order.
pub fn descending_by_annualized_return(a: &AnnualizedReturn, b: &AnnualizedReturn) -> Ordering {
    b.annualized_return.total_cmp(&a.annualized_return)
}
