//! CoinDesk legacy bitcoin price index provider (fallback fiat source)
//!
//! The index only quotes a subset of currencies. A currency missing from the
//! `bpi` object is reported as a malformed response.

use crate::{
    error::ProviderError,
    provider::{normalize_fiat_rate, RateProvider},
    transport::HttpClient,
    types::CurrencyCode,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// CoinDesk API response for `/currentprice/{code}.json`
#[derive(Debug, Deserialize)]
struct CurrentPriceResponse {
    bpi: HashMap<String, IndexEntry>,
}

#[derive(Debug, Deserialize)]
struct IndexEntry {
    /// Grouped price, e.g. `"17,000.1234"`
    rate: String,
}

/// CoinDesk price index provider
pub struct CoindeskProvider {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl CoindeskProvider {
    /// Creates a new CoinDesk provider
    pub fn new(client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn build_url(&self, currency: CurrencyCode) -> String {
        format!(
            "{}/currentprice/{}.json",
            self.base_url.trim_end_matches('/'),
            currency.lowercase()
        )
    }
}

#[async_trait]
impl RateProvider<CurrencyCode> for CoindeskProvider {
    async fn fetch_rate(&self, currency: CurrencyCode) -> Result<String, ProviderError> {
        let url = self.build_url(currency);
        tracing::debug!(url = %url, "Fetching BTC price index from CoinDesk");

        let response = self.client.get(&url).await?;
        if !response.is_ok() {
            return Err(response.unavailable(self.provider_name()));
        }

        let index: CurrentPriceResponse = response.json().map_err(|e| {
            ProviderError::malformed(
                self.provider_name(),
                format!("missing bpi: {}. Response: {}", e, response.body),
            )
        })?;

        let entry = index.bpi.get(currency.code()).ok_or_else(|| {
            ProviderError::malformed(
                self.provider_name(),
                format!("{} not present in price index", currency),
            )
        })?;

        normalize_fiat_rate(self.provider_name(), &entry.rate)
    }

    fn provider_name(&self) -> &'static str {
        "coindesk"
    }
}
