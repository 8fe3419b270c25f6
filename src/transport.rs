//! HTTP transport used by the rate providers
//!
//! Providers only need "GET a URL, give me the status and a body I can decode
//! as JSON". [`HttpClient`] captures exactly that so tests can script
//! upstream responses without a network.

use crate::error::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Raw upstream response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, read regardless of status
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for HTTP 200
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Decodes the body into a typed response schema
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    /// Converts a non-200 response into `UpstreamUnavailable`
    ///
    /// The body is attached as the upstream error payload, compacted if it is
    /// JSON.
    pub fn unavailable(&self, provider: &'static str) -> ProviderError {
        let body = match serde_json::from_str::<serde_json::Value>(&self.body) {
            Ok(json) => json.to_string(),
            Err(_) => self.body.trim().to_string(),
        };
        ProviderError::UpstreamUnavailable {
            provider,
            status: self.status,
            body,
        }
    }
}

/// Minimal async GET client
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Performs a GET request and returns the status and body
    async fn get(&self, url: &str) -> Result<HttpResponse, ProviderError>;
}

/// [`HttpClient`] backed by reqwest
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Creates a new reqwest-backed client
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(ProviderError::NetworkError)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ProviderError::NetworkError)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(ProviderError::NetworkError)?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted HTTP client for testing
    ///
    /// Unrouted URLs fail with a transport error, like an unreachable host.
    #[derive(Default)]
    pub struct MockHttpClient {
        routes: Mutex<HashMap<String, HttpResponse>>,
        requests: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(&self, url: &str, status: u16, body: serde_json::Value) {
            self.routes
                .lock()
                .unwrap()
                .insert(url.to_string(), HttpResponse::new(status, body.to_string()));
        }

        pub fn route_text(&self, url: &str, status: u16, body: &str) {
            self.routes
                .lock()
                .unwrap()
                .insert(url.to_string(), HttpResponse::new(status, body));
        }

        /// URLs requested so far, in order
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_count(&self, url: &str) -> usize {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|u| u.as_str() == url)
                .count()
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.routes
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| ProviderError::Transport(format!("no route for {url}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        amount: String,
    }

    #[test]
    fn test_json_decoding() {
        let response = HttpResponse::new(200, r#"{"amount":"1.5"}"#);
        assert!(response.is_ok());
        assert_eq!(response.json::<Payload>().unwrap().amount, "1.5");
        assert!(HttpResponse::new(200, "<html>").json::<Payload>().is_err());
    }

    #[test]
    fn test_unavailable_keeps_error_payload() {
        let response = HttpResponse::new(404, r#"{ "errors": [ {"id": "not_found"} ] }"#);
        match response.unavailable("coinbase") {
            ProviderError::UpstreamUnavailable {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, "coinbase");
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"errors":[{"id":"not_found"}]}"#);
            }
            other => panic!("unexpected error: {other}"),
        }

        let response = HttpResponse::new(502, " Bad Gateway \n");
        match response.unavailable("coindesk") {
            ProviderError::UpstreamUnavailable { status, body, .. } => {
                assert_eq!(status, 502);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
