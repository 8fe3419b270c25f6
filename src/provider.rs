//! Provider abstraction for fetching rates from external APIs

use crate::{amount::Amount, constants::FIAT_RATE_DECIMALS, error::ProviderError};
use async_trait::async_trait;
use rust_decimal::RoundingStrategy;

/// Trait for rate providers
///
/// `S` is what the provider quotes: a fiat [`CurrencyCode`](crate::types::CurrencyCode),
/// a [`Token`](crate::types::Token) or a [`CryptoCode`](crate::types::CryptoCode).
/// Every call is a single upstream request with no retry.
#[async_trait]
pub trait RateProvider<S>: Send + Sync
where
    S: Copy + Send + Sync + 'static,
{
    /// Fetches the current rate for `subject`
    ///
    /// # Returns
    /// The rate as an unformatted decimal string (no symbols, no group
    /// separators), or `UpstreamUnavailable` / `UpstreamMalformed`
    async fn fetch_rate(&self, subject: S) -> Result<String, ProviderError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}

/// Normalizes a quoted fiat price such as `"17,000.1234"` or `"$17000"`
///
/// Currency symbols, surrounding whitespace and `,` thousands separators are
/// dropped and the value is rounded to cents, half away from zero:
/// `"17,000.1234"` becomes `"17000.12"`. Exponent notation is accepted.
/// Anything else, including decimal-comma quotes like `"17 000,50"`, is
/// `UpstreamMalformed`.
pub(crate) fn normalize_fiat_rate(
    provider: &'static str,
    quoted: &str,
) -> Result<String, ProviderError> {
    let malformed =
        || ProviderError::malformed(provider, format!("rate '{quoted}' is not numeric"));

    let plain = strip_group_separators(strip_currency_symbols(quoted)).ok_or_else(malformed)?;
    let amount = Amount::parse(&plain).map_err(|_| malformed())?;

    let mut rate = amount
        .as_decimal()
        .round_dp_with_strategy(FIAT_RATE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rate.rescale(FIAT_RATE_DECIMALS);
    Ok(rate.to_string())
}

fn strip_currency_symbols(quoted: &str) -> &str {
    quoted.trim_matches(|c: char| c.is_whitespace() || c == '$' || !c.is_ascii())
}

/// Removes `,` thousands separators, or returns `None` if any `,` is not one
fn strip_group_separators(number: &str) -> Option<String> {
    let (integer, rest) = match number.find(['.', 'e', 'E']) {
        Some(idx) => number.split_at(idx),
        None => (number, ""),
    };
    if rest.contains(',') {
        return None;
    }
    if !integer.contains(',') {
        return Some(number.to_string());
    }

    let is_digits = |group: &str| group.chars().all(|c| c.is_ascii_digit());
    let mut groups = integer.split(',');
    let lead = groups.next()?.trim_start_matches(['-', '+']);
    let lead_ok = (1..=3).contains(&lead.len()) && is_digits(lead);
    let tail_ok = groups.all(|group| group.len() == 3 && is_digits(group));

    (lead_ok && tail_ok).then(|| number.replace(',', ""))
}

/// Validates a BTC-denominated rate and returns it at full precision
///
/// Scientific notation (`"4.5e-7"`) is expanded.
pub(crate) fn normalize_btc_rate(
    provider: &'static str,
    quoted: &str,
) -> Result<String, ProviderError> {
    Amount::parse(quoted)
        .map(|rate| rate.to_string())
        .map_err(|_| ProviderError::malformed(provider, format!("rate '{quoted}' is not numeric")))
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::hash::Hash;
    use std::sync::Mutex;

    /// Scripted outcome for one subject
    #[derive(Debug, Clone)]
    pub enum MockOutcome {
        Rate(String),
        Unavailable(u16),
        Malformed(String),
    }

    /// Mock provider for testing
    pub struct MockProvider<S> {
        name: &'static str,
        responses: Mutex<HashMap<S, MockOutcome>>,
        calls: Mutex<Vec<S>>,
    }

    impl<S: Copy + Eq + Hash> MockProvider<S> {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                responses: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn set_rate(&self, subject: S, rate: &str) {
            self.responses
                .lock()
                .unwrap()
                .insert(subject, MockOutcome::Rate(rate.to_string()));
        }

        pub fn set_unavailable(&self, subject: S, status: u16) {
            self.responses
                .lock()
                .unwrap()
                .insert(subject, MockOutcome::Unavailable(status));
        }

        pub fn set_malformed(&self, subject: S, reason: &str) {
            self.responses
                .lock()
                .unwrap()
                .insert(subject, MockOutcome::Malformed(reason.to_string()));
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn calls(&self) -> Vec<S> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<S> RateProvider<S> for MockProvider<S>
    where
        S: Copy + Eq + Hash + Send + Sync + 'static,
    {
        async fn fetch_rate(&self, subject: S) -> Result<String, ProviderError> {
            self.calls.lock().unwrap().push(subject);
            let outcome = self.responses.lock().unwrap().get(&subject).cloned();
            match outcome {
                Some(MockOutcome::Rate(rate)) => Ok(rate),
                Some(MockOutcome::Unavailable(status)) => Err(ProviderError::UpstreamUnavailable {
                    provider: self.name,
                    status,
                    body: String::new(),
                }),
                Some(MockOutcome::Malformed(reason)) => {
                    Err(ProviderError::malformed(self.name, reason))
                }
                None => Err(ProviderError::UpstreamUnavailable {
                    provider: self.name,
                    status: 404,
                    body: String::new(),
                }),
            }
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }
}
