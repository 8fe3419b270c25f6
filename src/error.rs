//! Error types for the Bitcoin conversion SDK

use crate::types::CurrencyCode;
use thiserror::Error;

/// Errors raised by decimal arithmetic on amounts and rates
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Input string is not a plain decimal number
    #[error("Cannot parse '{0}' as a decimal amount")]
    Parse(String),

    /// Native float input was NaN or infinite
    #[error("Amount must be finite, got {0}")]
    NonFinite(String),

    /// Divisor was zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Result does not fit the decimal representation
    #[error("Arithmetic overflow")]
    Overflow,
}

/// Errors that can occur when fetching a rate from a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider answered with a non-200 status
    #[error("{provider} returned HTTP {status}: {body}")]
    UpstreamUnavailable {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Provider answered 200 but the expected field was missing or unusable
    #[error("{provider} returned a malformed response: {reason}")]
    UpstreamMalformed {
        provider: &'static str,
        reason: String,
    },

    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest client
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ProviderError {
    /// Creates an UpstreamMalformed error
    pub fn malformed(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::UpstreamMalformed {
            provider,
            reason: reason.into(),
        }
    }
}

/// Errors returned by the conversion functions
#[derive(Debug, Error)]
pub enum ConversionError {
    /// An amount or rate could not be represented or operated on
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// A single-source rate fetch failed
    #[error(transparent)]
    Upstream(#[from] ProviderError),

    /// Both the primary and the fallback fiat provider failed
    #[error("All fiat rate providers failed for {currency}: primary: {primary}; fallback: {fallback}")]
    AllProvidersFailed {
        currency: CurrencyCode,
        primary: Box<ProviderError>,
        fallback: Box<ProviderError>,
    },

    /// Code string is not part of the supported set
    #[error("Unsupported code: {0}")]
    UnsupportedCode(String),
}

impl ConversionError {
    /// Creates an AllProvidersFailed error
    pub fn all_failed(
        currency: CurrencyCode,
        primary: ProviderError,
        fallback: ProviderError,
    ) -> Self {
        Self::AllProvidersFailed {
            currency,
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        }
    }
}
