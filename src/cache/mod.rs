//! Cache module for storing API responses in memory
//!
//! This module provides a TTL cache keyed by request URL and a fetcher that
//! consults it before going to the network. Nothing is written to disk; the
//! cache lives as long as the process.

mod fetcher;
mod manager;

pub use fetcher::{StatementFetcher, Statements};
pub use manager::{CacheEntry, Clock, ManualClock, ResponseCache, SystemClock, DEFAULT_TTL_MINUTES};
