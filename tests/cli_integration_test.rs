//! CLI integration tests for command orchestration.
//!
//! Tests cover:
//! - Config loading and provider selection (build_quote_port)
//! - Worker-count resolution precedence (resolve_workers)
//! - Closing-price listing order (closing_prices)
//! - End-to-end `returns` run against the CSV quote adapter on disk

mod common;

use annualize::adapters::file_config_adapter::FileConfigAdapter;
use annualize::cli::{self, Cli, Command};
use annualize::domain::error::AnnualizeError;
use common::*;
use std::fs;
use std::io::Write;
use std::process::ExitCode;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

mod provider_selection {
    use super::*;

    #[test]
    fn defaults_to_tiingo_when_token_present() {
        let config =
            FileConfigAdapter::from_string("[provider]\ntoken = abc123\n").unwrap();
        assert!(cli::build_quote_port(&config).is_ok());
    }

    #[test]
    fn tiingo_without_token_is_a_config_error() {
        let config = FileConfigAdapter::from_string("[provider]\nname = tiingo\n").unwrap();
        let err = cli::build_quote_port(&config).unwrap_err();
        assert!(matches!(err, AnnualizeError::ConfigMissing { .. }));
    }

    #[test]
    fn alphavantage_is_selectable() {
        let config = FileConfigAdapter::from_string(
            "[provider]\nname = alphavantage\ntoken = abc123\n",
        )
        .unwrap();
        assert!(cli::build_quote_port(&config).is_ok());
    }

    #[test]
    fn csv_requires_data_dir() {
        let config = FileConfigAdapter::from_string("[provider]\nname = csv\n").unwrap();
        let err = cli::build_quote_port(&config).unwrap_err();
        assert!(matches!(err, AnnualizeError::ConfigMissing { .. }));
    }

    #[test]
    fn unknown_provider_is_a_config_error() {
        let config =
            FileConfigAdapter::from_string("[provider]\nname = bloomberg\n").unwrap();
        let err = cli::build_quote_port(&config).unwrap_err();
        assert!(matches!(err, AnnualizeError::ConfigInvalid { .. }));
    }
}

mod worker_resolution {
    use super::*;

    #[test]
    fn flag_overrides_config() {
        let config = FileConfigAdapter::from_string("[engine]\nworkers = 8\n").unwrap();
        assert_eq!(cli::resolve_workers(Some(2), &config), 2);
    }

    #[test]
    fn config_applies_without_flag() {
        let config = FileConfigAdapter::from_string("[engine]\nworkers = 8\n").unwrap();
        assert_eq!(cli::resolve_workers(None, &config), 8);
    }

    #[test]
    fn defaults_to_sequential() {
        let config = FileConfigAdapter::from_string("[engine]\n").unwrap();
        assert_eq!(cli::resolve_workers(None, &config), 0);
    }

    #[test]
    fn negative_config_value_means_sequential() {
        let config = FileConfigAdapter::from_string("[engine]\nworkers = -3\n").unwrap();
        assert_eq!(cli::resolve_workers(None, &config), 0);
    }
}

mod closing_prices {
    use super::*;
    use annualize::ports::quote_port::QuoteError;

    #[test]
    fn sorted_ascending_by_price() {
        let quotes = MockQuotePort::new()
            .with_candles("EXPENSIVE", vec![candle("2019-01-01", 500.0, 510.0)])
            .with_candles("CHEAP", vec![candle("2019-01-01", 10.0, 9.5)])
            .with_candles("MID", vec![candle("2019-01-01", 100.0, 101.0)]);
        let trades = vec![
            trade("EXPENSIVE", "2018-01-01"),
            trade("CHEAP", "2018-01-01"),
            trade("MID", "2018-01-01"),
            trade("NODATA", "2018-01-01"),
        ];

        let prices = cli::closing_prices(&trades, date("2019-01-01"), &quotes).unwrap();

        let symbols: Vec<&str> = prices.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(symbols, vec!["CHEAP", "MID", "EXPENSIVE"]);
        assert_eq!(prices[0].1, 9.5);
    }

    #[test]
    fn quote_failure_propagates() {
        let quotes = MockQuotePort::new().with_error(
            "FAIL",
            QuoteError::RateLimited {
                retry_after_secs: 10,
            },
        );
        let trades = vec![trade("FAIL", "2018-01-01")];

        let err = cli::closing_prices(&trades, date("2019-01-01"), &quotes).unwrap_err();
        assert!(matches!(err, AnnualizeError::QuoteUnavailable { .. }));
    }
}

mod end_to_end {
    use super::*;

    fn assert_exit(code: ExitCode, expected: ExitCode) {
        assert_eq!(format!("{code:?}"), format!("{expected:?}"));
    }

    /// Full `returns` run: trades.json + INI config + CSV quote files on disk.
    #[test]
    fn returns_command_with_csv_provider() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_dir = dir.path().join("quotes");
        fs::create_dir(&data_dir).unwrap();

        fs::write(
            data_dir.join("AAPL.csv"),
            "date,open,high,low,close\n\
             2018-01-01,100.0,101.0,99.0,100.5\n\
             2019-01-01,109.0,110.5,108.0,110.0\n",
        )
        .unwrap();
        fs::write(
            data_dir.join("MSFT.csv"),
            "date,open,high,low,close\n\
             2018-01-01,50.0,51.0,49.0,50.5\n\
             2019-01-01,59.0,60.5,58.0,60.0\n",
        )
        .unwrap();

        let trades_path = dir.path().join("trades.json");
        fs::write(
            &trades_path,
            r#"[
                {"symbol": "AAPL", "purchaseDate": "2018-01-01"},
                {"symbol": "MSFT", "purchaseDate": "2018-01-01"}
            ]"#,
        )
        .unwrap();

        let config = write_temp_ini(&format!(
            "[provider]\nname = csv\ndata_dir = {}\n\n[engine]\nworkers = 2\n",
            data_dir.display()
        ));

        let code = cli::run(Cli {
            command: Command::Returns {
                trades: trades_path,
                end_date: date("2019-01-01"),
                config: config.path().to_path_buf(),
                workers: None,
            },
        });
        assert_exit(code, ExitCode::SUCCESS);
    }

    #[test]
    fn returns_command_fails_on_missing_trades_file() {
        let config = write_temp_ini("[provider]\nname = csv\ndata_dir = /tmp\n");

        let code = cli::run(Cli {
            command: Command::Returns {
                trades: "/nonexistent/trades.json".into(),
                end_date: date("2019-01-01"),
                config: config.path().to_path_buf(),
                workers: None,
            },
        });
        assert_exit(code, ExitCode::from(3));
    }

    #[test]
    fn symbols_command_lists_file_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let trades_path = dir.path().join("trades.json");
        fs::write(
            &trades_path,
            r#"[{"symbol": "MSFT", "purchaseDate": "2018-01-02"},
               {"symbol": "AAPL", "purchaseDate": "2018-01-02"}]"#,
        )
        .unwrap();

        let code = cli::run(Cli {
            command: Command::Symbols {
                trades: trades_path,
            },
        });
        assert_exit(code, ExitCode::SUCCESS);
    }
}
