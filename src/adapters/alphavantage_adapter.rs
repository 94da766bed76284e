//! Alphavantage TIME_SERIES_DAILY HTTP adapter.
//!
//! Alphavantage keys its JSON fields with numbered names ("1. open") and
//! quotes every number as a string; the serde renames and parsing stay
//! private to this adapter. Throttle notices arrive as a "Note" field in an
//! otherwise-successful response and are surfaced as rate limiting.

use crate::domain::candle::Candle;
use crate::domain::error::AnnualizeError;
use crate::ports::config_port::ConfigPort;
use crate::ports::quote_port::{QuoteError, QuotePort};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, DailyQuote>>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyQuote {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
}

impl DailyQuote {
    fn into_candle(self, date: NaiveDate) -> Result<Candle, QuoteError> {
        let parse = |field: &str, value: &str| {
            value.parse::<f64>().map_err(|_| {
                QuoteError::MalformedResponse(format!("bad {field} value '{value}' on {date}"))
            })
        };
        Ok(Candle {
            date,
            open: parse("open", &self.open)?,
            high: parse("high", &self.high)?,
            low: parse("low", &self.low)?,
            close: parse("close", &self.close)?,
        })
    }
}

#[derive(Debug)]
pub struct AlphavantageAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl AlphavantageAdapter {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
        }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, AnnualizeError> {
        let api_key = config.get_string("provider", "token").ok_or_else(|| {
            AnnualizeError::ConfigMissing {
                section: "provider".into(),
                key: "token".into(),
            }
        })?;
        Ok(Self::new(api_key, config.get_string("provider", "base_url")))
    }

    fn query_url(&self, symbol: &str) -> String {
        format!(
            "{}/query?function=TIME_SERIES_DAILY&symbol={}&outputsize=full&apikey={}",
            self.base_url, symbol, self.api_key
        )
    }

    /// The daily series covers the symbol's full history; the requested
    /// window is cut out here, ascending by date via the BTreeMap ordering.
    fn parse_response(
        symbol: &str,
        resp: DailyResponse,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, QuoteError> {
        if resp.note.is_some() {
            return Err(QuoteError::RateLimited {
                retry_after_secs: 60,
            });
        }
        if let Some(message) = resp.error_message {
            return Err(QuoteError::MalformedResponse(format!("{symbol}: {message}")));
        }

        let series = resp.series.ok_or_else(|| {
            QuoteError::MalformedResponse(format!("{symbol}: missing daily time series"))
        })?;

        let mut candles = Vec::new();
        for (day, quote) in series {
            let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d").map_err(|e| {
                QuoteError::MalformedResponse(format!("{symbol}: bad date '{day}': {e}"))
            })?;
            if date < from || date > to {
                continue;
            }
            candles.push(quote.into_candle(date)?);
        }
        Ok(candles)
    }
}

impl QuotePort for AlphavantageAdapter {
    fn fetch_daily(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, QuoteError> {
        let url = self.query_url(symbol);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QuoteError::RateLimited {
                retry_after_secs: 60,
            });
        }
        if !status.is_success() {
            return Err(QuoteError::MalformedResponse(format!(
                "HTTP {status} for {symbol}"
            )));
        }

        let parsed: DailyResponse = resp
            .json()
            .map_err(|e| QuoteError::MalformedResponse(format!("{symbol}: {e}")))?;

        Self::parse_response(symbol, parsed, from, to)
    }
}
