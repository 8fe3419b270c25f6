//! xchain asset provider (token sources)
//!
//! One fixed endpoint per token, `GET {base}/asset/{SYMBOL}`, quoting the
//! estimated BTC value of one unit.

use crate::{
    error::ProviderError,
    provider::{normalize_btc_rate, RateProvider},
    transport::HttpClient,
    types::Token,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// xchain API response for `/asset/{SYMBOL}`
#[derive(Debug, Deserialize)]
struct AssetResponse {
    estimated_value: EstimatedValue,
}

#[derive(Debug, Deserialize)]
struct EstimatedValue {
    btc: String,
}

/// xchain token price provider
pub struct XchainProvider {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl XchainProvider {
    /// Creates a new xchain provider
    pub fn new(client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Returns the fixed asset endpoint for a token
    pub fn endpoint(&self, token: Token) -> String {
        format!(
            "{}/asset/{}",
            self.base_url.trim_end_matches('/'),
            token.symbol()
        )
    }
}

#[async_trait]
impl RateProvider<Token> for XchainProvider {
    async fn fetch_rate(&self, token: Token) -> Result<String, ProviderError> {
        let url = self.endpoint(token);
        tracing::debug!(url = %url, token = %token, "Fetching token estimate from xchain");

        let response = self.client.get(&url).await?;
        if !response.is_ok() {
            return Err(response.unavailable(self.provider_name()));
        }

        let asset: AssetResponse = response.json().map_err(|e| {
            ProviderError::malformed(
                self.provider_name(),
                format!("missing estimated_value.btc: {}. Response: {}", e, response.body),
            )
        })?;

        normalize_btc_rate(self.provider_name(), &asset.estimated_value.btc)
    }

    fn provider_name(&self) -> &'static str {
        "xchain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockHttpClient;
    use serde_json::json;

    const BASE: &str = "https://xchain.io/api";

    #[test]
    fn test_endpoints() {
        let provider = XchainProvider::new(Arc::new(MockHttpClient::new()), BASE);
        assert_eq!(
            provider.endpoint(Token::Pepecash),
            "https://xchain.io/api/asset/PEPECASH"
        );
        assert_eq!(provider.endpoint(Token::Xcp), "https://xchain.io/api/asset/XCP");
    }

    #[tokio::test]
    async fn test_fetch_estimated_btc_value() {
        let client = Arc::new(MockHttpClient::new());
        client.route(
            "https://xchain.io/api/asset/XCP",
            200,
            json!({
                "asset": "XCP",
                "estimated_value": {"btc": "0.00022868", "usd": "9.61", "xcp": "1.00000000"}
            }),
        );

        let rate = XchainProvider::new(client, BASE)
            .fetch_rate(Token::Xcp)
            .await
            .unwrap();

        assert_eq!(rate, "0.00022868");
    }

    #[tokio::test]
    async fn test_missing_estimate_is_malformed() {
        let client = Arc::new(MockHttpClient::new());
        client.route(
            "https://xchain.io/api/asset/PEPECASH",
            200,
            json!({"asset": "PEPECASH"}),
        );

        let err = XchainProvider::new(client, BASE)
            .fetch_rate(Token::Pepecash)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProviderError::UpstreamMalformed { provider: "xchain", .. }
        ));
    }

    #[tokio::test]
    async fn test_non_200_is_unavailable() {
        let client = Arc::new(MockHttpClient::new());
        client.route(
            "https://xchain.io/api/asset/PEPECASH",
            404,
            json!({"error": "asset not found"}),
        );

        let err = XchainProvider::new(client, BASE)
            .fetch_rate(Token::Pepecash)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProviderError::UpstreamUnavailable { status: 404, ref body, .. }
                if body.contains("asset not found")
        ));
    }
}
