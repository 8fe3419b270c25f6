//! Constants for the Bitcoin conversion SDK
//!
//! Defaults for every knob in [`ConverterConfig`](crate::config::ConverterConfig)
//! live here. Hosts override them through the config, not by editing these.

/// Number of satoshis in one bitcoin
pub const SATOSHIS_PER_BITCOIN: i64 = 100_000_000;

/// How long a fetched fiat rate stays fresh (in milliseconds)
pub const CACHE_TTL_MS: u64 = 60_000;

/// Environment variable selecting the runtime mode
pub const ENV_MODE_VAR: &str = "BTC_CONVERSION_ENV";

/// Value of [`ENV_MODE_VAR`] that disables rate caching
pub const TEST_MODE: &str = "test";

/// HTTP request timeout when fetching rates (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Fractional digits kept on fiat rates
pub const FIAT_RATE_DECIMALS: u32 = 2;

/// Coinbase API base URL (primary fiat provider)
pub const COINBASE_API_URL: &str = "https://api.coinbase.com/v2";

/// CoinDesk legacy bitcoin price index base URL (fallback fiat provider)
pub const COINDESK_API_URL: &str = "https://api.coindesk.com/v1/bpi";

/// xchain asset API base URL (token providers)
pub const XCHAIN_API_URL: &str = "https://xchain.io/api";

/// CryptoCompare API base URL (crypto providers)
pub const CRYPTOCOMPARE_API_URL: &str = "https://min-api.cryptocompare.com/data";

/// User agent for HTTP requests
pub const USER_AGENT: &str = "bitcoin-conversion-sdk/0.1.0";
