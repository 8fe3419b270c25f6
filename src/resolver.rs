//! Rate resolvers
//!
//! [`FiatRateResolver`] produces one authoritative BTC price per fiat
//! currency:
//!
//! ```text
//! cache (fresh?) ──hit──▶ rate
//!      │ miss
//!      ▼
//! primary provider ──ok──▶ write cache ──▶ rate
//!      │ err
//!      ▼
//! fallback provider ──ok──▶ write cache ──▶ rate
//!      │ err
//!      ▼
//! AllProvidersFailed { primary, fallback }
//! ```
//!
//! The fallback is only tried after the primary has failed. There is no
//! retry or backoff beyond that single fallback step.
//!
//! [`SingleSourceResolver`] serves tokens and other cryptocurrencies: one
//! provider, no cache, errors propagate as-is.

use crate::{
    cache::RateCache,
    error::{ConversionError, ProviderError},
    metrics::MetricsCollector,
    provider::RateProvider,
    types::CurrencyCode,
};
use chrono::Utc;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

/// Calls a provider and records the outcome
async fn timed_fetch<S>(
    provider: &dyn RateProvider<S>,
    subject: S,
    metrics: &MetricsCollector,
) -> Result<String, ProviderError>
where
    S: Copy + Send + Sync + 'static,
{
    let start = Instant::now();
    let result = provider.fetch_rate(subject).await;
    metrics
        .record_request(provider.provider_name(), start.elapsed(), result.is_ok())
        .await;
    result
}

/// Cached primary → fallback resolver for BTC/fiat rates
pub struct FiatRateResolver {
    cache: Arc<RateCache>,
    primary: Arc<dyn RateProvider<CurrencyCode>>,
    fallback: Arc<dyn RateProvider<CurrencyCode>>,
    metrics: Arc<MetricsCollector>,
}

impl FiatRateResolver {
    pub fn new(
        cache: Arc<RateCache>,
        primary: Arc<dyn RateProvider<CurrencyCode>>,
        fallback: Arc<dyn RateProvider<CurrencyCode>>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            cache,
            primary,
            fallback,
            metrics,
        }
    }

    /// Returns the cache backing this resolver
    pub fn cache(&self) -> &Arc<RateCache> {
        &self.cache
    }

    /// Resolves the price of one BTC in `currency`
    ///
    /// # Returns
    /// The normalized rate string, or `AllProvidersFailed` carrying both
    /// upstream errors
    pub async fn resolve(&self, currency: CurrencyCode) -> Result<String, ConversionError> {
        let now_ms = Utc::now().timestamp_millis();

        if let Some(entry) = self.cache.get_fresh(currency, now_ms).await {
            tracing::debug!(currency = %currency, rate = %entry.rate, "Fiat rate cache hit");
            return Ok(entry.rate);
        }

        let primary_err = match timed_fetch(self.primary.as_ref(), currency, &self.metrics).await {
            Ok(rate) => {
                self.cache.put(currency, rate.clone(), now_ms).await;
                return Ok(rate);
            }
            Err(e) => e,
        };

        tracing::warn!(
            currency = %currency,
            primary = self.primary.provider_name(),
            fallback = self.fallback.provider_name(),
            error = %primary_err,
            "Primary fiat provider failed, falling back"
        );

        match timed_fetch(self.fallback.as_ref(), currency, &self.metrics).await {
            Ok(rate) => {
                self.cache.put(currency, rate.clone(), now_ms).await;
                Ok(rate)
            }
            Err(fallback_err) => {
                tracing::warn!(
                    currency = %currency,
                    error = %fallback_err,
                    "Fallback fiat provider failed"
                );
                Err(ConversionError::all_failed(currency, primary_err, fallback_err))
            }
        }
    }
}

/// Uncached single-provider resolver for token and crypto rates
pub struct SingleSourceResolver<S: Copy + Send + Sync + 'static> {
    provider: Arc<dyn RateProvider<S>>,
    metrics: Arc<MetricsCollector>,
}

impl<S> SingleSourceResolver<S>
where
    S: Copy + Display + Send + Sync + 'static,
{
    pub fn new(provider: Arc<dyn RateProvider<S>>, metrics: Arc<MetricsCollector>) -> Self {
        Self { provider, metrics }
    }

    /// Fetches the BTC value of one unit of `subject`
    pub async fn resolve(&self, subject: S) -> Result<String, ConversionError> {
        timed_fetch(self.provider.as_ref(), subject, &self.metrics)
            .await
            .map_err(|e| {
                tracing::warn!(
                    subject = %subject,
                    provider = self.provider.provider_name(),
                    error = %e,
                    "Rate fetch failed"
                );
                ConversionError::Upstream(e)
            })
    }
}
