//! Bitcoin converter service
//!
//! Owns the rate cache, the resolvers and the provider metrics. Create one per
//! process at startup and share it; there is no global instance.

use crate::{
    amount::{Amount, ToAmount},
    cache::RateCache,
    config::ConverterConfig,
    error::{ConversionError, ProviderError},
    metrics::{MetricsCollector, ProviderMetrics},
    provider::RateProvider,
    providers::{CoinbaseProvider, CoindeskProvider, CryptoCompareProvider, XchainProvider},
    resolver::{FiatRateResolver, SingleSourceResolver},
    transport::{HttpClient, ReqwestClient},
    types::{CryptoCode, CurrencyCode, Token},
    units,
};
use std::sync::Arc;
use std::time::Duration;

/// Converts between BTC, satoshis, fiat currencies, xchain tokens and other
/// cryptocurrencies
///
/// # Example
/// ```no_run
/// use bitcoin_conversion_sdk::{BitcoinConverter, CurrencyCode};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let converter = BitcoinConverter::new()?;
/// let usd = converter.bitcoin_to_fiat(0.5, CurrencyCode::USD).await?;
/// println!("0.5 BTC = ${:.2}", usd.to_f64());
/// # Ok(())
/// # }
/// ```
pub struct BitcoinConverter {
    fiat: FiatRateResolver,
    tokens: SingleSourceResolver<Token>,
    crypto: SingleSourceResolver<CryptoCode>,
    metrics: Arc<MetricsCollector>,
}

impl BitcoinConverter {
    /// Creates a converter from the environment-derived config
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(ConverterConfig::from_env())
    }

    /// Creates a converter talking to the configured endpoints over reqwest
    pub fn with_config(config: ConverterConfig) -> Result<Self, ProviderError> {
        let client = ReqwestClient::new(config.request_timeout, &config.user_agent)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Creates a converter on top of a custom HTTP client
    pub fn with_client(config: ConverterConfig, client: Arc<dyn HttpClient>) -> Self {
        tracing::debug!(
            cache_ttl_ms = config.cache_ttl.as_millis() as u64,
            "Creating bitcoin converter"
        );
        Self::with_providers(
            config.cache_ttl,
            Arc::new(CoinbaseProvider::new(client.clone(), config.coinbase_api_url)),
            Arc::new(CoindeskProvider::new(client.clone(), config.coindesk_api_url)),
            Arc::new(XchainProvider::new(client.clone(), config.xchain_api_url)),
            Arc::new(CryptoCompareProvider::new(client, config.cryptocompare_api_url)),
        )
    }

    /// Creates a converter from explicit providers
    ///
    /// This is primarily for testing with mock providers.
    pub fn with_providers(
        cache_ttl: Duration,
        primary: Arc<dyn RateProvider<CurrencyCode>>,
        fallback: Arc<dyn RateProvider<CurrencyCode>>,
        tokens: Arc<dyn RateProvider<Token>>,
        crypto: Arc<dyn RateProvider<CryptoCode>>,
    ) -> Self {
        let metrics = Arc::new(MetricsCollector::new());
        let cache = Arc::new(RateCache::new(cache_ttl));

        Self {
            fiat: FiatRateResolver::new(cache, primary, fallback, metrics.clone()),
            tokens: SingleSourceResolver::new(tokens, metrics.clone()),
            crypto: SingleSourceResolver::new(crypto, metrics.clone()),
            metrics,
        }
    }

    /// Returns the fiat rate cache
    pub fn cache(&self) -> &RateCache {
        self.fiat.cache()
    }

    /// Gets the price of one BTC in `currency`, from cache or upstream
    pub async fn fiat_rate(&self, currency: CurrencyCode) -> Result<String, ConversionError> {
        self.fiat.resolve(currency).await
    }

    /// Gets the BTC value of one unit of `token`
    pub async fn token_rate(&self, token: Token) -> Result<String, ConversionError> {
        self.tokens.resolve(token).await
    }

    /// Gets the BTC value of one unit of `crypto`
    pub async fn crypto_rate(&self, crypto: CryptoCode) -> Result<String, ConversionError> {
        self.crypto.resolve(crypto).await
    }

    /// Converts bitcoin to a fiat currency
    pub async fn bitcoin_to_fiat(
        &self,
        amount_in_btc: impl ToAmount,
        convert_to: CurrencyCode,
    ) -> Result<Amount, ConversionError> {
        let btc = amount_in_btc.to_amount()?;
        let rate = Amount::parse(&self.fiat_rate(convert_to).await?)?;
        Ok(btc.checked_mul(rate)?)
    }

    /// Converts a fiat amount to bitcoin
    pub async fn fiat_to_bitcoin(
        &self,
        amount_in_currency: impl ToAmount,
        convert_from: CurrencyCode,
    ) -> Result<Amount, ConversionError> {
        let fiat = amount_in_currency.to_amount()?;
        let rate = Amount::parse(&self.fiat_rate(convert_from).await?)?;
        Ok(fiat.checked_div(rate)?)
    }

    /// Converts satoshis to a fiat currency
    pub async fn satoshis_to_fiat(
        &self,
        amount_in_sats: impl ToAmount,
        convert_to: CurrencyCode,
    ) -> Result<Amount, ConversionError> {
        let btc = units::satoshis_to_bitcoin(amount_in_sats)?;
        self.bitcoin_to_fiat(btc, convert_to).await
    }

    /// Converts a fiat amount to satoshis
    pub async fn fiat_to_satoshis(
        &self,
        amount_in_currency: impl ToAmount,
        convert_from: CurrencyCode,
    ) -> Result<Amount, ConversionError> {
        let btc = self.fiat_to_bitcoin(amount_in_currency, convert_from).await?;
        units::bitcoin_to_satoshis(btc)
    }

    /// Converts bitcoin to units of `token`
    pub async fn bitcoin_to_token(
        &self,
        amount_in_btc: impl ToAmount,
        token: Token,
    ) -> Result<Amount, ConversionError> {
        let btc = amount_in_btc.to_amount()?;
        let rate = Amount::parse(&self.token_rate(token).await?)?;
        Ok(btc.checked_div(rate)?)
    }

    /// Converts units of `token` to bitcoin
    pub async fn token_to_bitcoin(
        &self,
        amount_in_token: impl ToAmount,
        token: Token,
    ) -> Result<Amount, ConversionError> {
        let quantity = amount_in_token.to_amount()?;
        let rate = Amount::parse(&self.token_rate(token).await?)?;
        Ok(quantity.checked_mul(rate)?)
    }

    /// Converts bitcoin to PEPECASH
    pub async fn bitcoin_to_pepecash(
        &self,
        amount_in_btc: impl ToAmount,
    ) -> Result<Amount, ConversionError> {
        self.bitcoin_to_token(amount_in_btc, Token::Pepecash).await
    }

    /// Converts PEPECASH to bitcoin
    pub async fn pepecash_to_bitcoin(
        &self,
        amount_in_pepecash: impl ToAmount,
    ) -> Result<Amount, ConversionError> {
        self.token_to_bitcoin(amount_in_pepecash, Token::Pepecash).await
    }

    /// Converts bitcoin to XCP
    pub async fn bitcoin_to_xcp(
        &self,
        amount_in_btc: impl ToAmount,
    ) -> Result<Amount, ConversionError> {
        self.bitcoin_to_token(amount_in_btc, Token::Xcp).await
    }

    /// Converts XCP to bitcoin
    pub async fn xcp_to_bitcoin(
        &self,
        amount_in_xcp: impl ToAmount,
    ) -> Result<Amount, ConversionError> {
        self.token_to_bitcoin(amount_in_xcp, Token::Xcp).await
    }

    /// Converts units of another cryptocurrency to bitcoin
    pub async fn crypto_to_bitcoin(
        &self,
        amount_in_crypto: impl ToAmount,
        crypto: CryptoCode,
    ) -> Result<Amount, ConversionError> {
        let amount = amount_in_crypto.to_amount()?;
        let rate = Amount::parse(&self.crypto_rate(crypto).await?)?;
        Ok(amount.checked_mul(rate)?)
    }

    /// Gets provider metrics including latency percentiles and success rates
    pub async fn provider_metrics(&self) -> Vec<ProviderMetrics> {
        self.metrics.all_metrics().await
    }
}
