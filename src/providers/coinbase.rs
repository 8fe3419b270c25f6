//! Coinbase spot price provider (primary fiat source)

use crate::{
    error::ProviderError,
    provider::{normalize_fiat_rate, RateProvider},
    transport::HttpClient,
    types::CurrencyCode,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Coinbase API response for `/prices/BTC-{CODE}/spot`
#[derive(Debug, Deserialize)]
struct SpotPriceResponse {
    data: SpotPrice,
}

#[derive(Debug, Deserialize)]
struct SpotPrice {
    amount: String,
}

/// Coinbase spot price provider
pub struct CoinbaseProvider {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl CoinbaseProvider {
    /// Creates a new Coinbase provider
    pub fn new(client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Builds the spot price URL for a currency
    fn build_url(&self, currency: CurrencyCode) -> String {
        format!(
            "{}/prices/BTC-{}/spot",
            self.base_url.trim_end_matches('/'),
            currency.code()
        )
    }
}

#[async_trait]
impl RateProvider<CurrencyCode> for CoinbaseProvider {
    async fn fetch_rate(&self, currency: CurrencyCode) -> Result<String, ProviderError> {
        let url = self.build_url(currency);
        tracing::debug!(url = %url, "Fetching BTC spot price from Coinbase");

        let response = self.client.get(&url).await?;
        if !response.is_ok() {
            return Err(response.unavailable(self.provider_name()));
        }

        let spot: SpotPriceResponse = response.json().map_err(|e| {
            ProviderError::malformed(
                self.provider_name(),
                format!("missing data.amount: {}. Response: {}", e, response.body),
            )
        })?;

        normalize_fiat_rate(self.provider_name(), &spot.data.amount)
    }

    fn provider_name(&self) -> &'static str {
        "coinbase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockHttpClient;
    use serde_json::json;

    const USD_URL: &str = "https://api.coinbase.com/v2/prices/BTC-USD/spot";

    fn provider(client: Arc<MockHttpClient>) -> CoinbaseProvider {
        CoinbaseProvider::new(client, "https://api.coinbase.com/v2/")
    }

    #[tokio::test]
    async fn test_fetch_spot_price() {
        let client = Arc::new(MockHttpClient::new());
        client.route(
            USD_URL,
            200,
            json!({"data": {"amount": "17000", "base": "BTC", "currency": "USD"}}),
        );

        let rate = provider(client.clone()).fetch_rate(CurrencyCode::USD).await.unwrap();

        assert_eq!(rate, "17000.00");
        assert_eq!(client.requests(), vec![USD_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_non_200_is_unavailable() {
        let client = Arc::new(MockHttpClient::new());
        client.route(
            USD_URL,
            500,
            json!({"errors": [{"id": "internal_server_error"}]}),
        );

        let err = provider(client).fetch_rate(CurrencyCode::USD).await.unwrap_err();

        assert!(matches!(
            err,
            ProviderError::UpstreamUnavailable { provider: "coinbase", status: 500, ref body }
                if body.contains("internal_server_error")
        ));
    }

    #[tokio::test]
    async fn test_missing_amount_is_malformed() {
        let client = Arc::new(MockHttpClient::new());
        client.route(USD_URL, 200, json!({"data": {"base": "BTC"}}));

        let err = provider(client).fetch_rate(CurrencyCode::USD).await.unwrap_err();

        assert!(matches!(
            err,
            ProviderError::UpstreamMalformed { provider: "coinbase", .. }
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let client = Arc::new(MockHttpClient::new());

        let err = provider(client).fetch_rate(CurrencyCode::EUR).await.unwrap_err();

        assert!(matches!(err, ProviderError::Transport(_)));
    }
}
