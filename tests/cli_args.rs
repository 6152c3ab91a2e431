//! Integration tests for CLI argument handling
//!
//! Tests startup validation of the ticker, period and API key.

use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
///
/// Runs from an empty directory with no `FMP_API_KEY` so a local `.env`
/// cannot leak into the result.
fn run_cli(args: &[&str]) -> std::process::Output {
    let dir = TempDir::new().expect("Failed to create temp dir");
    Command::new(env!("CARGO_BIN_EXE_incomeview"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("FMP_API_KEY")
        .output()
        .expect("Failed to execute incomeview")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("incomeview"), "Help should mention incomeview");
    assert!(stdout.contains("--ticker"), "Help should mention --ticker flag");
    assert!(
        stdout.contains("FMP_API_KEY"),
        "Help should mention the API key variable"
    );
}

#[test]
fn test_missing_api_key_prints_error_and_exits() {
    let output = run_cli(&["--ticker", "MSFT"]);
    assert!(!output.status.success(), "Expected missing key to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Missing API key"),
        "Should explain the missing key: {}",
        stderr
    );
}

#[test]
fn test_invalid_period_prints_error_and_exits() {
    let output = run_cli(&["--period", "monthly", "--api-key", "demo"]);
    assert!(!output.status.success(), "Expected invalid period to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid period"),
        "Should print error message about the period: {}",
        stderr
    );
}

#[test]
fn test_invalid_ticker_prints_error_and_exits() {
    let output = run_cli(&["--ticker", "NOT A TICKER", "--api-key", "demo"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid ticker"), "stderr: {}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use incomeview::cli::{parse_period_arg, Cli, CliError, StartupConfig};
    use incomeview::data::Period;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["incomeview", "--api-key", "demo"]);
        assert_eq!(cli.ticker, "AAPL");
        assert_eq!(cli.period, "annual");
        assert_eq!(cli.cache_ttl_minutes, 60);
        assert!(cli.base_url.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_parse_period_arg_quarter() {
        assert_eq!(parse_period_arg("quarter").unwrap(), Period::Quarter);
    }

    #[test]
    fn test_startup_config_normalizes_ticker() {
        let cli = Cli::parse_from(["incomeview", "-t", "msft", "--api-key", "demo"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.ticker, "MSFT");
        assert_eq!(config.period, Period::Annual);
        assert_eq!(config.cache_ttl.num_minutes(), 60);
    }

    #[test]
    fn test_startup_config_custom_ttl() {
        let cli = Cli::parse_from([
            "incomeview",
            "--api-key",
            "demo",
            "--cache-ttl-minutes",
            "5",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache_ttl.num_minutes(), 5);
    }

    #[test]
    fn test_startup_config_zero_ttl_is_rejected() {
        let cli = Cli::parse_from([
            "incomeview",
            "--api-key",
            "demo",
            "--cache-ttl-minutes",
            "0",
        ]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidCacheTtl)
        ));
    }
}
