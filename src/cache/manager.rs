//! In-memory response cache with time-to-live expiry
//!
//! Provides a `ResponseCache` that stores payloads keyed by request URL along
//! with the time they were fetched. Entries older than the TTL are treated as
//! absent and are swept whenever the cache is read.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::trace;

/// Default freshness window for cached responses
pub const DEFAULT_TTL_MINUTES: i64 = 60;

/// Source of the current time for expiry checks
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the cache.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A cached payload and when it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached payload
    pub payload: T,
    /// When the payload was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Keyed cache of fetched payloads
///
/// An entry is live while its age is strictly less than the TTL.
pub struct ResponseCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl: Duration,
    clock: Box<dyn Clock>,
}

impl<T> fmt::Debug for ResponseCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.entries.len())
            .field("ttl", &self.ttl)
            .field("clock", &self.clock)
            .finish()
    }
}

impl<T> Default for ResponseCache<T> {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_TTL_MINUTES))
    }
}

impl<T> ResponseCache<T> {
    /// Creates an empty cache using the system clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }

    /// Creates an empty cache with a custom clock
    pub fn with_clock(ttl: Duration, clock: impl Clock + 'static) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock: Box::new(clock),
        }
    }

    /// Freshness window of this cache
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_live(&self, entry: &CacheEntry<T>, now: DateTime<Utc>) -> bool {
        now - entry.fetched_at < self.ttl
    }

    /// Removes every expired entry, returning how many were dropped
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| now - entry.fetched_at < ttl);
        let swept = before - self.entries.len();
        if swept > 0 {
            trace!(swept, "dropped expired cache entries");
        }
        swept
    }

    /// Returns the live entry for `key`, sweeping expired entries first
    pub fn get_entry(&mut self, key: &str) -> Option<&CacheEntry<T>> {
        self.sweep_expired();
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| self.is_live(entry, now))
    }

    /// Returns the live payload for `key`
    pub fn get(&mut self, key: &str) -> Option<&T> {
        self.get_entry(key).map(|entry| &entry.payload)
    }

    /// Stores a payload fetched now, replacing any previous entry
    pub fn insert(&mut self, key: impl Into<String>, payload: T) {
        let entry = CacheEntry {
            payload,
            fetched_at: self.clock.now(),
        };
        self.entries.insert(key.into(), entry);
    }

    /// Number of stored entries, including ones not yet swept
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
