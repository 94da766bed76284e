//! Portfolio return aggregation — sequential and parallel engines.

use super::error::AnnualizeError;
use super::pool::WorkerPool;
use super::returns::{self, AnnualizedReturn};
use super::trade::Trade;
use crate::ports::quote_port::QuotePort;
use chrono::NaiveDate;

/// Fetch quotes for one trade and compute its return.
///
/// Buy price is the open of the first bar, sell price the close of the last,
/// and the last bar's date is the annualization end point — the realized
/// trading window, not the nominal end date. `Ok(None)` means the provider
/// had no bars for the window; the trade contributes no result.
fn trade_return(
    trade: &Trade,
    end_date: NaiveDate,
    quotes: &dyn QuotePort,
) -> Result<Option<AnnualizedReturn>, AnnualizeError> {
    let candles = quotes
        .fetch_daily(&trade.symbol, trade.purchase_date, end_date)
        .map_err(|source| AnnualizeError::QuoteUnavailable {
            symbol: trade.symbol.clone(),
            source,
        })?;

    let (Some(first), Some(last)) = (candles.first(), candles.last()) else {
        return Ok(None);
    };

    let result = returns::calculate_annualized_return(trade, last.date, first.open, last.close)?;
    Ok(Some(result))
}

/// Compute returns for every trade in input order, then sort descending by
/// annualized return.
///
/// Fail-fast: any quote or calculator error aborts the batch; the caller
/// never receives a partial result list.
pub fn calculate_returns(
    trades: &[Trade],
    end_date: NaiveDate,
    quotes: &dyn QuotePort,
) -> Result<Vec<AnnualizedReturn>, AnnualizeError> {
    let mut results = Vec::with_capacity(trades.len());
    for trade in trades {
        if let Some(result) = trade_return(trade, end_date, quotes)? {
            results.push(result);
        }
    }
    results.sort_by(returns::descending_by_annualized_return);
    Ok(results)
}

/// Same contract and output as [`calculate_returns`], fanned out over a
/// bounded worker pool.
///
/// Every trade is fetched exactly once, even when another trade has already
/// failed; outcomes are reassembled in input order after the pool joins, so
/// sorting (and stable ties) cannot depend on completion order. When several
/// trades fail, the error surfaced is the one earliest in input order —
/// identical to what the sequential engine would report.
pub fn calculate_returns_parallel(
    trades: &[Trade],
    end_date: NaiveDate,
    quotes: &dyn QuotePort,
    max_workers: usize,
) -> Result<Vec<AnnualizedReturn>, AnnualizeError> {
    if trades.is_empty() {
        return Ok(Vec::new());
    }

    let pool = WorkerPool::bounded(max_workers, trades.len());
    let outcomes = pool.run(trades.len(), |index| {
        trade_return(&trades[index], end_date, quotes)
    });

    let mut results = Vec::with_capacity(trades.len());
    for (_, outcome) in outcomes {
        if let Some(result) = outcome? {
            results.push(result);
        }
    }
    results.sort_by(returns::descending_by_annualized_return);
    Ok(results)
}
