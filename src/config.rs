//! Converter configuration
//!
//! The only externally observable toggle is the `BTC_CONVERSION_ENV`
//! environment variable: set to `test`, the fiat rate cache TTL drops to zero
//! so every conversion hits the (mocked) upstream.

use crate::constants::{
    CACHE_TTL_MS, COINBASE_API_URL, COINDESK_API_URL, CRYPTOCOMPARE_API_URL, ENV_MODE_VAR,
    REQUEST_TIMEOUT_SECS, TEST_MODE, USER_AGENT, XCHAIN_API_URL,
};
use std::time::Duration;

/// Settings for a [`BitcoinConverter`](crate::converter::BitcoinConverter)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// How long a fetched fiat rate is reused
    pub cache_ttl: Duration,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// User agent sent to every upstream
    pub user_agent: String,
    pub coinbase_api_url: String,
    pub coindesk_api_url: String,
    pub xchain_api_url: String,
    pub cryptocompare_api_url: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_millis(CACHE_TTL_MS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            coinbase_api_url: COINBASE_API_URL.to_string(),
            coindesk_api_url: COINDESK_API_URL.to_string(),
            xchain_api_url: XCHAIN_API_URL.to_string(),
            cryptocompare_api_url: CRYPTOCOMPARE_API_URL.to_string(),
        }
    }
}

impl ConverterConfig {
    /// Builds the default config, honoring `BTC_CONVERSION_ENV`
    pub fn from_env() -> Self {
        Self::for_mode(std::env::var(ENV_MODE_VAR).ok().as_deref())
    }

    fn for_mode(mode: Option<&str>) -> Self {
        let config = Self::default();
        match mode {
            Some(mode) if mode.eq_ignore_ascii_case(TEST_MODE) => {
                tracing::debug!(env = ENV_MODE_VAR, "Test mode, fiat rate caching disabled");
                config.with_cache_ttl(Duration::ZERO)
            }
            _ => config,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_coinbase_api_url(mut self, url: impl Into<String>) -> Self {
        self.coinbase_api_url = url.into();
        self
    }

    pub fn with_coindesk_api_url(mut self, url: impl Into<String>) -> Self {
        self.coindesk_api_url = url.into();
        self
    }

    pub fn with_xchain_api_url(mut self, url: impl Into<String>) -> Self {
        self.xchain_api_url = url.into();
        self
    }

    pub fn with_cryptocompare_api_url(mut self, url: impl Into<String>) -> Self {
        self.cryptocompare_api_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_one_minute() {
        assert_eq!(ConverterConfig::default().cache_ttl, Duration::from_secs(60));
        assert_eq!(
            ConverterConfig::for_mode(Some("production")).cache_ttl,
            Duration::from_secs(60)
        );
        assert_eq!(ConverterConfig::for_mode(None).cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_test_mode_disables_cache() {
        assert_eq!(ConverterConfig::for_mode(Some("test")).cache_ttl, Duration::ZERO);
        assert_eq!(ConverterConfig::for_mode(Some("TEST")).cache_ttl, Duration::ZERO);
    }

    #[test]
    fn test_builders() {
        let config = ConverterConfig::default()
            .with_coinbase_api_url("http://localhost:1/v2")
            .with_user_agent("ua")
            .with_request_timeout(Duration::from_secs(1));
        assert_eq!(config.coinbase_api_url, "http://localhost:1/v2");
        assert_eq!(config.user_agent, "ua");
        assert_eq!(config.request_timeout, Duration::from_secs(1));
        assert_eq!(config.coindesk_api_url, COINDESK_API_URL);
    }
}
