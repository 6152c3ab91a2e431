//! Cached income-statement fetching
//!
//! Combines the API client with a `ResponseCache` so repeated requests for
//! the same ticker and period within the TTL never reach the network.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use super::manager::{Clock, ResponseCache};
use crate::data::{FetchError, FinancialStatement, IncomeStatementClient, Period};

/// Statements shared between the cache and its readers
pub type Statements = Arc<Vec<FinancialStatement>>;

/// Fetches statements through an in-memory cache
///
/// Overlapping calls for the same uncached key are not deduplicated; each
/// performs its own request and the last one to finish wins the slot.
#[derive(Debug)]
pub struct StatementFetcher {
    client: IncomeStatementClient,
    cache: ResponseCache<Statements>,
}

impl StatementFetcher {
    pub fn new(client: IncomeStatementClient, ttl: Duration) -> Self {
        Self {
            client,
            cache: ResponseCache::new(ttl),
        }
    }

    /// Creates a fetcher whose cache reads time from `clock`
    pub fn with_clock(client: IncomeStatementClient, ttl: Duration, clock: impl Clock + 'static) -> Self {
        Self {
            client,
            cache: ResponseCache::with_clock(ttl, clock),
        }
    }

    pub fn cache(&self) -> &ResponseCache<Statements> {
        &self.cache
    }

    /// Fetches statements for a ticker and period
    pub async fn fetch(&mut self, ticker: &str, period: Period) -> Result<Statements, FetchError> {
        let key = self.client.request_key(ticker, period);
        self.fetch_key(&key).await
    }

    /// Returns the cached payload for `key` if it is live, otherwise performs
    /// one request and stores the result
    ///
    /// Failures are returned as-is and leave the cache untouched.
    pub async fn fetch_key(&mut self, key: &str) -> Result<Statements, FetchError> {
        if let Some(hit) = self.cache.get(key).cloned() {
            debug!(key, "cache hit");
            return Ok(hit);
        }

        debug!(key, "cache miss");
        let statements: Statements = Arc::new(self.client.fetch_url(key).await?);
        info!(key, count = statements.len(), "cached income statements");
        self.cache.insert(key, Arc::clone(&statements));
        Ok(statements)
    }
}
