//! Financial Modeling Prep income-statement API client
//!
//! Fetches income statements for a ticker and classifies HTTP failures so the
//! UI can show a rate-limit or access-denied message.

use std::fmt;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use super::{FinancialStatement, Period};

/// Base URL for the Financial Modeling Prep v3 API
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Errors that can occur when fetching income statements
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API rejected the request because of rate limiting (HTTP 429)
    #[error("HTTP error! status: 429")]
    RateLimited,

    /// The API rejected the API key (HTTP 403)
    #[error("HTTP error! status: 403")]
    AccessDenied,

    /// Any other non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// HTTP request failed before a response was received
    ///
    /// The wrapped error carries no URL, since the request URL holds the API key.
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::RequestFailed(err.without_url())
    }
}

impl FetchError {
    /// Classifies a non-success HTTP status
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
            StatusCode::FORBIDDEN => FetchError::AccessDenied,
            other => FetchError::Status(other.as_u16()),
        }
    }

    /// Message shown to the user for this error
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::RateLimited => "Too many requests. Please try again in a few minutes.",
            FetchError::AccessDenied => "Access denied. Please check your API key.",
            _ => "An error occurred",
        }
    }
}

/// Client for fetching income statements
#[derive(Clone)]
pub struct IncomeStatementClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
    /// Static API key sent with every request
    api_key: String,
}

impl fmt::Debug for IncomeStatementClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncomeStatementClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl IncomeStatementClient {
    /// Creates a client against the public API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(FMP_BASE_URL, api_key)
    }

    /// Creates a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Builds the request URL for a ticker and period
    ///
    /// This is also the cache key. The API key is attached separately when the
    /// request is sent so it never appears in keys or logs.
    pub fn request_key(&self, ticker: &str, period: Period) -> String {
        format!(
            "{}/income-statement/{}?period={}",
            self.base_url,
            ticker,
            period.as_str()
        )
    }

    /// Fetches income statements for a ticker
    ///
    /// # Returns
    /// * `Ok(Vec<FinancialStatement>)` - Statements as returned by the API (possibly empty)
    /// * `Err(FetchError)` - If the request fails, returns a non-success status, or
    ///   the body is not a statement array
    pub async fn fetch_statements(
        &self,
        ticker: &str,
        period: Period,
    ) -> Result<Vec<FinancialStatement>, FetchError> {
        let url = self.request_key(ticker, period);
        self.fetch_url(&url).await
    }

    /// Performs one GET against a request key built by [`Self::request_key`]
    pub async fn fetch_url(&self, url: &str) -> Result<Vec<FinancialStatement>, FetchError> {
        debug!(url, "requesting income statements");

        let response = self
            .http_client
            .get(url)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "income statement request failed");
            return Err(FetchError::from_status(status));
        }

        let text = response.text().await?;
        let statements: Vec<FinancialStatement> = serde_json::from_str(&text)?;

        debug!(url, count = statements.len(), "received income statements");
        Ok(statements)
    }
}
