//! CryptoCompare price provider (crypto → BTC rates)

use crate::{
    error::ProviderError,
    provider::{normalize_btc_rate, RateProvider},
    transport::HttpClient,
    types::CryptoCode,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// CryptoCompare API response for `/price?fsym={CODE}&tsyms=BTC`
///
/// Errors come back as HTTP 200 with a `Response: "Error"` body, which
/// simply lacks the `BTC` field.
#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[serde(rename = "BTC")]
    btc: serde_json::Number,
}

/// CryptoCompare price provider
pub struct CryptoCompareProvider {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl CryptoCompareProvider {
    /// Creates a new CryptoCompare provider
    pub fn new(client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn build_url(&self, crypto: CryptoCode) -> String {
        format!(
            "{}/price?fsym={}&tsyms=BTC",
            self.base_url.trim_end_matches('/'),
            crypto.code()
        )
    }
}

#[async_trait]
impl RateProvider<CryptoCode> for CryptoCompareProvider {
    async fn fetch_rate(&self, crypto: CryptoCode) -> Result<String, ProviderError> {
        let url = self.build_url(crypto);
        tracing::debug!(url = %url, "Fetching BTC price from CryptoCompare");

        let response = self.client.get(&url).await?;
        if !response.is_ok() {
            return Err(response.unavailable(self.provider_name()));
        }

        let price: PriceResponse = response.json().map_err(|e| {
            ProviderError::malformed(
                self.provider_name(),
                format!("missing BTC: {}. Response: {}", e, response.body),
            )
        })?;

        normalize_btc_rate(self.provider_name(), &price.btc.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "cryptocompare"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockHttpClient;
    use serde_json::json;

    const ETH_URL: &str = "https://min-api.cryptocompare.com/data/price?fsym=ETH&tsyms=BTC";

    #[tokio::test]
    async fn test_fetch_numeric_rate() {
        let client = Arc::new(MockHttpClient::new());
        client.route(ETH_URL, 200, json!({"BTC": 0.05123}));

        let rate = CryptoCompareProvider::new(client, "https://min-api.cryptocompare.com/data")
            .fetch_rate(CryptoCode::ETH)
            .await
            .unwrap();

        assert_eq!(rate, "0.05123");
    }

    #[tokio::test]
    async fn test_error_payload_is_malformed() {
        let client = Arc::new(MockHttpClient::new());
        client.route(
            ETH_URL,
            200,
            json!({"Response": "Error", "Message": "market does not exist"}),
        );

        let err = CryptoCompareProvider::new(client, "https://min-api.cryptocompare.com/data")
            .fetch_rate(CryptoCode::ETH)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProviderError::UpstreamMalformed { provider: "cryptocompare", ref reason }
                if reason.contains("market does not exist")
        ));
    }
}
