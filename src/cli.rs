//! Command-line interface parsing for incomeview
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated `StartupConfig`. The API key may come from `--api-key` or the
//! `FMP_API_KEY` environment variable (which `main` also loads from `.env`).

use std::fmt;
use std::path::PathBuf;

use chrono::Duration;
use clap::Parser;
use thiserror::Error;

use crate::cache::DEFAULT_TTL_MINUTES;
use crate::data::Period;

/// Longest ticker symbol accepted
const MAX_TICKER_LEN: usize = 10;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The ticker is empty or contains characters a symbol cannot have
    #[error("Invalid ticker: '{0}'. Use letters, digits, '.' or '-'")]
    InvalidTicker(String),

    /// The specified period is not recognized
    #[error("Invalid period: '{0}'. Valid periods: annual, quarter")]
    InvalidPeriod(String),

    /// No API key was given on the command line or in the environment
    #[error("Missing API key: pass --api-key or set FMP_API_KEY")]
    MissingApiKey,

    /// A zero TTL would disable caching entirely
    #[error("Invalid cache TTL: must be at least one minute")]
    InvalidCacheTtl,
}

/// incomeview - Browse a company's income statements in the terminal
#[derive(Parser)]
#[command(name = "incomeview")]
#[command(about = "Income statements with filtering, sorting and a revenue chart")]
#[command(version)]
pub struct Cli {
    /// Stock ticker to load on startup
    #[arg(long, short, default_value = "AAPL")]
    pub ticker: String,

    /// Reporting period: annual or quarter
    #[arg(long, default_value = "annual")]
    pub period: String,

    /// Financial Modeling Prep API key
    #[arg(long, env = "FMP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// How long fetched statements stay fresh, in minutes
    #[arg(long, default_value_t = DEFAULT_TTL_MINUTES as u32)]
    pub cache_ttl_minutes: u32,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Placeholder printed instead of an API key
const REDACTED: &str = "<redacted>";

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("ticker", &self.ticker)
            .field("period", &self.period)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("base_url", &self.base_url)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// Configuration derived from CLI arguments for application startup
#[derive(Clone)]
pub struct StartupConfig {
    /// Normalized ticker to load first
    pub ticker: String,
    pub period: Period,
    pub api_key: String,
    pub base_url: Option<String>,
    /// Freshness window for the response cache
    pub cache_ttl: Duration,
    pub log_file: Option<PathBuf>,
}

/// Upper-cases and validates a ticker symbol
pub fn normalize_ticker(s: &str) -> Result<String, CliError> {
    let ticker = s.trim().to_uppercase();
    let valid = !ticker.is_empty()
        && ticker.len() <= MAX_TICKER_LEN
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    if valid {
        Ok(ticker)
    } else {
        Err(CliError::InvalidTicker(s.to_string()))
    }
}

/// Parses a period string argument
pub fn parse_period_arg(s: &str) -> Result<Period, CliError> {
    Period::from_str(s).ok_or_else(|| CliError::InvalidPeriod(s.to_string()))
}

impl fmt::Debug for StartupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartupConfig")
            .field("ticker", &self.ticker)
            .field("period", &self.period)
            .field("api_key", &REDACTED)
            .field("base_url", &self.base_url)
            .field("cache_ttl", &self.cache_ttl)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with normalized values
    /// * `Err(CliError)` if the ticker, period, TTL or API key is unusable
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let ticker = normalize_ticker(&cli.ticker)?;
        let period = parse_period_arg(&cli.period)?;

        if cli.cache_ttl_minutes == 0 {
            return Err(CliError::InvalidCacheTtl);
        }

        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(CliError::MissingApiKey)?
            .to_string();

        Ok(StartupConfig {
            ticker,
            period,
            api_key,
            base_url: cli.base_url.clone(),
            cache_ttl: Duration::minutes(i64::from(cli.cache_ttl_minutes)),
            log_file: cli.log_file.clone(),
        })
    }
}
