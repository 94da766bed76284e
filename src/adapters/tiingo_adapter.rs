//! Tiingo daily-prices HTTP adapter.
//!
//! Fetches `/tiingo/daily/{symbol}/prices` with the API token injected at
//! construction time. Parses Tiingo's candle array privately and emits
//! domain [`Candle`]s only.

use crate::domain::candle::Candle;
use crate::domain::error::AnnualizeError;
use crate::ports::config_port::ConfigPort;
use crate::ports::quote_port::{QuoteError, QuotePort};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.tiingo.com";

/// Wire shape of one Tiingo daily price entry.
#[derive(Debug, Deserialize)]
struct TiingoCandle {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl TiingoCandle {
    fn into_candle(self) -> Result<Candle, QuoteError> {
        // Tiingo dates arrive as full timestamps ("2019-01-02T00:00:00.000Z");
        // only the day matters for daily bars.
        let day = self.date.split('T').next().unwrap_or(&self.date);
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| {
            QuoteError::MalformedResponse(format!("bad date '{}': {e}", self.date))
        })?;
        Ok(Candle {
            date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        })
    }
}

#[derive(Debug)]
pub struct TiingoAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl TiingoAdapter {
    pub fn new(token: String, base_url: Option<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token,
        }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, AnnualizeError> {
        let token = config.get_string("provider", "token").ok_or_else(|| {
            AnnualizeError::ConfigMissing {
                section: "provider".into(),
                key: "token".into(),
            }
        })?;
        Ok(Self::new(token, config.get_string("provider", "base_url")))
    }

    fn prices_url(&self, symbol: &str, from: NaiveDate, to: NaiveDate) -> String {
        format!(
            "{}/tiingo/daily/{}/prices?startDate={}&endDate={}&token={}",
            self.base_url, symbol, from, to, self.token
        )
    }

    fn parse_entries(symbol: &str, entries: Vec<TiingoCandle>) -> Result<Vec<Candle>, QuoteError> {
        let mut candles = entries
            .into_iter()
            .map(TiingoCandle::into_candle)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| match e {
                QuoteError::MalformedResponse(reason) => {
                    QuoteError::MalformedResponse(format!("{symbol}: {reason}"))
                }
                other => other,
            })?;
        candles.sort_by_key(|c| c.date);
        Ok(candles)
    }
}

impl QuotePort for TiingoAdapter {
    fn fetch_daily(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, QuoteError> {
        let url = self.prices_url(symbol, from, to);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(QuoteError::RateLimited {
                retry_after_secs: retry_after,
            });
        }
        if !status.is_success() {
            return Err(QuoteError::MalformedResponse(format!(
                "HTTP {status} for {symbol}"
            )));
        }

        let entries: Vec<TiingoCandle> = resp
            .json()
            .map_err(|e| QuoteError::MalformedResponse(format!("{symbol}: {e}")))?;

        Self::parse_entries(symbol, entries)
    }
}
