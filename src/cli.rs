//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::alphavantage_adapter::AlphavantageAdapter;
use crate::adapters::csv_adapter::CsvQuoteAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::tiingo_adapter::TiingoAdapter;
use crate::adapters::trade_file_adapter;
use crate::domain::error::AnnualizeError;
use crate::domain::portfolio::{calculate_returns, calculate_returns_parallel};
use crate::domain::trade::Trade;
use crate::ports::config_port::ConfigPort;
use crate::ports::quote_port::QuotePort;

#[derive(Parser, Debug)]
#[command(name = "annualize", about = "Portfolio annualized-return calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute annualized returns for a portfolio, best first
    Returns {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(short, long)]
        end_date: NaiveDate,
        #[arg(short, long)]
        config: PathBuf,
        /// Parallel fetch workers (overrides [engine] workers; 0 or 1 runs sequentially)
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Print each symbol's closing price on the end date, cheapest first
    Quotes {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(short, long)]
        end_date: NaiveDate,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the symbols in a trade file, in file order
    Symbols {
        #[arg(short, long)]
        trades: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Returns {
            trades,
            end_date,
            config,
            workers,
        } => run_returns(&trades, end_date, &config, workers),
        Command::Quotes {
            trades,
            end_date,
            config,
        } => run_quotes(&trades, end_date, &config),
        Command::Symbols { trades } => run_symbols(&trades),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = AnnualizeError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Select the quote source named by `[provider] name` (default: tiingo).
pub fn build_quote_port(config: &dyn ConfigPort) -> Result<Box<dyn QuotePort>, AnnualizeError> {
    let name = config
        .get_string("provider", "name")
        .unwrap_or_else(|| "tiingo".to_string());

    match name.as_str() {
        "tiingo" => Ok(Box::new(TiingoAdapter::from_config(config)?)),
        "alphavantage" => Ok(Box::new(AlphavantageAdapter::from_config(config)?)),
        "csv" => Ok(Box::new(CsvQuoteAdapter::from_config(config)?)),
        other => Err(AnnualizeError::ConfigInvalid {
            section: "provider".into(),
            key: "name".into(),
            reason: format!("unknown provider '{other}'"),
        }),
    }
}

/// CLI flag wins over `[engine] workers`; absent or non-positive means
/// sequential.
pub fn resolve_workers(flag: Option<usize>, config: &dyn ConfigPort) -> usize {
    flag.unwrap_or_else(|| config.get_int("engine", "workers", 0).max(0) as usize)
}

fn run_returns(
    trades_path: &PathBuf,
    end_date: NaiveDate,
    config_path: &PathBuf,
    workers_flag: Option<usize>,
) -> ExitCode {
    eprintln!("Loading trades from {}", trades_path.display());
    let trades = match trade_file_adapter::load_trades(trades_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let quotes = match build_quote_port(&config) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let workers = resolve_workers(workers_flag, &config);
    eprintln!(
        "Computing returns for {} trades up to {}",
        trades.len(),
        end_date
    );

    let results = if workers > 1 {
        eprintln!("  using {workers} fetch workers");
        calculate_returns_parallel(&trades, end_date, quotes.as_ref(), workers)
    } else {
        calculate_returns(&trades, end_date, quotes.as_ref())
    };

    let results = match results {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if results.is_empty() {
        eprintln!("No trades had price data in the window");
        return ExitCode::SUCCESS;
    }

    println!("{:<10} {:>12} {:>12}", "SYMBOL", "ANNUALIZED", "TOTAL");
    for r in &results {
        println!(
            "{:<10} {:>11.2}% {:>11.2}%",
            r.symbol,
            r.annualized_return * 100.0,
            r.total_return * 100.0
        );
    }
    ExitCode::SUCCESS
}

fn run_quotes(trades_path: &PathBuf, end_date: NaiveDate, config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading trades from {}", trades_path.display());
    let trades = match trade_file_adapter::load_trades(trades_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let quotes = match build_quote_port(&config) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let prices = match closing_prices(&trades, end_date, quotes.as_ref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for (symbol, close) in &prices {
        println!("{:<10} {:>10.2}", symbol, close);
    }
    ExitCode::SUCCESS
}

/// Closing price of each symbol on its last traded day in the window,
/// sorted ascending by price. Symbols without data are skipped.
pub fn closing_prices(
    trades: &[Trade],
    end_date: NaiveDate,
    quotes: &dyn QuotePort,
) -> Result<Vec<(String, f64)>, AnnualizeError> {
    let mut prices = Vec::with_capacity(trades.len());
    for trade in trades {
        let candles = quotes
            .fetch_daily(&trade.symbol, trade.purchase_date, end_date)
            .map_err(|source| AnnualizeError::QuoteUnavailable {
                symbol: trade.symbol.clone(),
                source,
            })?;
        if let Some(last) = candles.last() {
            prices.push((trade.symbol.clone(), last.close));
        }
    }
    prices.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(prices)
}

fn run_symbols(trades_path: &PathBuf) -> ExitCode {
    let trades = match trade_file_adapter::load_trades(trades_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for trade in &trades {
        println!("{}", trade.symbol);
    }
    eprintln!("{} symbols", trades.len());
    ExitCode::SUCCESS
}
