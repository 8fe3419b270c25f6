//! In-memory fiat rate cache
//!
//! One entry per [`CurrencyCode`], overwritten on every successful fetch and
//! never evicted. Staleness is checked at read time against the TTL.

use crate::types::{CurrencyCode, RateCacheEntry};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

/// Fiat rate cache keyed by currency code
///
/// Concurrent misses for the same code may both fetch and both write; the
/// later write wins.
pub struct RateCache {
    entries: RwLock<HashMap<CurrencyCode, RateCacheEntry>>,
    ttl: Duration,
}

impl RateCache {
    /// Creates an empty cache with the given time-to-live
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(CurrencyCode::all().len())),
            ttl,
        }
    }

    /// Returns the configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Gets the entry for a currency, fresh or not
    pub async fn get(&self, currency: CurrencyCode) -> Option<RateCacheEntry> {
        self.entries.read().await.get(&currency).cloned()
    }

    /// Gets the entry for a currency if it is still fresh at `now_ms`
    pub async fn get_fresh(&self, currency: CurrencyCode, now_ms: i64) -> Option<RateCacheEntry> {
        self.get(currency)
            .await
            .filter(|entry| entry.is_fresh(now_ms, self.ttl))
    }

    /// Stores a rate fetched at `now_ms`, replacing any previous entry
    pub async fn put(&self, currency: CurrencyCode, rate: impl Into<String>, now_ms: i64) {
        let entry = RateCacheEntry::new(rate.into(), now_ms);
        tracing::debug!(
            currency = %currency,
            rate = %entry.rate,
            fetched_at_ms = now_ms,
            "Cached fiat rate"
        );
        self.entries.write().await.insert(currency, entry);
    }

    /// Number of currencies with a cached entry
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing has been cached yet
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
