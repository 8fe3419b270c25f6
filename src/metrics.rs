//! Provider health metrics
//!
//! Tracks latency percentiles and success rates per upstream provider. Purely
//! diagnostic; conversions never depend on it.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::RwLock;

/// Maximum number of samples to keep per provider
const MAX_SAMPLES: usize = 100;

/// Metrics for a single provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderMetrics {
    /// Name of the provider
    pub provider_name: String,
    /// 50th percentile latency in milliseconds
    pub latency_p50_ms: f64,
    /// 99th percentile latency in milliseconds
    pub latency_p99_ms: f64,
    /// Success rate (0.0 to 1.0)
    pub success_rate: f64,
    /// Total number of requests tracked
    pub total_requests: u64,
    /// Number of failed requests
    pub failed_requests: u64,
}

#[derive(Debug, Clone)]
struct LatencySample {
    duration_ms: f64,
    success: bool,
}

#[derive(Debug, Default)]
struct ProviderStats {
    samples: VecDeque<LatencySample>,
    total_requests: u64,
    failed_requests: u64,
}

impl ProviderStats {
    fn record(&mut self, duration: Duration, success: bool) {
        self.total_requests += 1;
        if !success {
            self.failed_requests += 1;
        }
        if self.samples.len() >= MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(LatencySample {
            duration_ms: duration.as_secs_f64() * 1000.0,
            success,
        });
    }

    fn snapshot(&self, provider_name: &str) -> ProviderMetrics {
        let mut latencies: Vec<f64> = self
            .samples
            .iter()
            .filter(|s| s.success)
            .map(|s| s.duration_ms)
            .collect();
        latencies.sort_by(|a, b| a.total_cmp(b));

        let success_rate = if self.total_requests > 0 {
            (self.total_requests - self.failed_requests) as f64 / self.total_requests as f64
        } else {
            1.0
        };

        ProviderMetrics {
            provider_name: provider_name.to_string(),
            latency_p50_ms: percentile(&latencies, 50.0),
            latency_p99_ms: percentile(&latencies, 99.0),
            success_rate,
            total_requests: self.total_requests,
            failed_requests: self.failed_requests,
        }
    }
}

/// Collects request outcomes for every provider a resolver talks to
#[derive(Debug, Default)]
pub struct MetricsCollector {
    providers: RwLock<HashMap<&'static str, ProviderStats>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one upstream request
    pub async fn record_request(&self, provider: &'static str, duration: Duration, success: bool) {
        self.providers
            .write()
            .await
            .entry(provider)
            .or_default()
            .record(duration, success);
    }

    /// Metrics for one provider, if it has been called
    pub async fn get_metrics(&self, provider: &str) -> Option<ProviderMetrics> {
        self.providers
            .read()
            .await
            .get(provider)
            .map(|stats| stats.snapshot(provider))
    }

    /// Metrics for every provider called so far, sorted by name
    pub async fn all_metrics(&self) -> Vec<ProviderMetrics> {
        let providers = self.providers.read().await;
        let mut metrics: Vec<_> = providers
            .iter()
            .map(|(name, stats)| stats.snapshot(name))
            .collect();
        metrics.sort_by(|a, b| a.provider_name.cmp(&b.provider_name));
        metrics
    }
}

/// Calculate percentile from sorted values
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted_values.len() - 1) as f64).round() as usize;
    sorted_values[idx.min(sorted_values.len() - 1)]
}
