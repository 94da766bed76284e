//! CSV file quote adapter.
//!
//! Offline quote source reading `{data_dir}/{SYMBOL}.csv` files with
//! `date,open,high,low,close` rows. A missing file is "no data for that
//! symbol", matching a provider that returns zero bars.

use crate::domain::candle::Candle;
use crate::domain::error::AnnualizeError;
use crate::ports::config_port::ConfigPort;
use crate::ports::quote_port::{QuoteError, QuotePort};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub struct CsvQuoteAdapter {
    data_dir: PathBuf,
}

impl CsvQuoteAdapter {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, AnnualizeError> {
        let data_dir = config.get_string("provider", "data_dir").ok_or_else(|| {
            AnnualizeError::ConfigMissing {
                section: "provider".into(),
                key: "data_dir".into(),
            }
        })?;
        Ok(Self::new(PathBuf::from(data_dir)))
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", symbol))
    }

    fn field<'a>(
        record: &'a csv::StringRecord,
        index: usize,
        name: &str,
    ) -> Result<&'a str, QuoteError> {
        record
            .get(index)
            .ok_or_else(|| QuoteError::MalformedResponse(format!("missing {name} column")))
    }

    fn price(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, QuoteError> {
        Self::field(record, index, name)?.parse().map_err(|e| {
            QuoteError::MalformedResponse(format!("invalid {name} value: {e}"))
        })
    }
}

impl QuotePort for CsvQuoteAdapter {
    fn fetch_daily(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candle>, QuoteError> {
        let path = self.csv_path(symbol);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(QuoteError::MalformedResponse(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for result in rdr.records() {
            let record = result
                .map_err(|e| QuoteError::MalformedResponse(format!("CSV parse error: {e}")))?;

            let date_str = Self::field(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                QuoteError::MalformedResponse(format!("invalid date format: {e}"))
            })?;

            if date < from || date > to {
                continue;
            }

            candles.push(Candle {
                date,
                open: Self::price(&record, 1, "open")?,
                high: Self::price(&record, 2, "high")?,
                low: Self::price(&record, 3, "low")?,
                close: Self::price(&record, 4, "close")?,
            });
        }

        candles.sort_by_key(|c| c.date);
        Ok(candles)
    }
}
