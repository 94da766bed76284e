#![allow(dead_code)]

use annualize::domain::candle::Candle;
use annualize::domain::trade::Trade;
use annualize::ports::quote_port::{QuoteError, QuotePort};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn trade(symbol: &str, purchased: &str) -> Trade {
    Trade {
        symbol: symbol.to_string(),
        purchase_date: date(purchased),
    }
}

pub fn candle(day: &str, open: f64, close: f64) -> Candle {
    Candle {
        date: date(day),
        open,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        close,
    }
}

/// Deterministic in-memory quote source. Applies the requested window to the
/// stored candles, like a real provider would.
#[derive(Debug)]
pub struct MockQuotePort {
    pub candles: HashMap<String, Vec<Candle>>,
    pub errors: HashMap<String, QuoteError>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            candles: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.candles.insert(symbol.to_string(), candles);
        self
    }

    pub fn with_error(mut self, symbol: &str, error: QuoteError) -> Self {
        self.errors.insert(symbol.to_string(), error);
        self
    }
}

impl QuotePort for MockQuotePort {
    fn fetch_daily(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, QuoteError> {
        if let Some(error) = self.errors.get(symbol) {
            return Err(error.clone());
        }
        Ok(self
            .candles
            .get(symbol)
            .map(|candles| {
                candles
                    .iter()
                    .filter(|c| c.date >= from && c.date <= to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Wraps another quote port and counts fetches per symbol.
#[derive(Debug)]
pub struct CountingQuotePort<Q> {
    pub inner: Q,
    pub fetches: Mutex<HashMap<String, usize>>,
}

impl<Q> CountingQuotePort<Q> {
    pub fn new(inner: Q) -> Self {
        Self {
            inner,
            fetches: Mutex::new(HashMap::new()),
        }
    }

    pub fn fetch_count(&self, symbol: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(symbol)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }
}

impl<Q: QuotePort> QuotePort for CountingQuotePort<Q> {
    fn fetch_daily(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, QuoteError> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_insert(0) += 1;
        self.inner.fetch_daily(symbol, from, to)
    }
}
