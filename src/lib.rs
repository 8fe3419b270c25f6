//! # Bitcoin Conversion SDK
//!
//! Converts amounts between BTC, satoshis, fiat currencies, the PEPECASH and
//! XCP counterparty tokens, and ETH, using live rates from public price APIs.
//!
//! ## Usage
//!
//! ```no_run
//! use bitcoin_conversion_sdk::{bitcoin_to_satoshis, BitcoinConverter, CurrencyCode};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = BitcoinConverter::new()?;
//!
//! let eur = converter.bitcoin_to_fiat("0.015", CurrencyCode::EUR).await?;
//! println!("0.015 BTC = €{:.2}", eur.to_f64());
//!
//! let sats = bitcoin_to_satoshis(0.2490521409)?;
//! assert_eq!(sats.to_string(), "24905214.09");
//! # Ok(())
//! # }
//! ```
//!
//! ## Rates
//!
//! ```text
//! BitcoinConverter
//!     ├── FiatRateResolver ── RateCache (TTL 60s, 0 when BTC_CONVERSION_ENV=test)
//!     │       ├── Coinbase spot price   (primary)
//!     │       └── CoinDesk price index  (fallback)
//!     ├── SingleSourceResolver<Token>      ── xchain asset estimate
//!     └── SingleSourceResolver<CryptoCode> ── CryptoCompare price
//! ```
//!
//! All arithmetic is decimal. Results come back as [`Amount`]; call
//! [`Amount::to_f64`] only for display.
//!
//! ## Error Handling
//!
//! ```no_run
//! use bitcoin_conversion_sdk::{BitcoinConverter, ConversionError, CurrencyCode};
//!
//! # async fn example(converter: BitcoinConverter) {
//! match converter.fiat_to_bitcoin(25, CurrencyCode::USD).await {
//!     Ok(btc) => println!("{} BTC", btc),
//!     Err(ConversionError::AllProvidersFailed { primary, fallback, .. }) => {
//!         eprintln!("no rate: {primary} / {fallback}")
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

pub mod amount;
pub mod cache;
pub mod config;
pub mod constants;
pub mod converter;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod providers;
pub mod resolver;
pub mod transport;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use amount::{Amount, ToAmount};
pub use config::ConverterConfig;
pub use converter::BitcoinConverter;
pub use error::{AmountError, ConversionError, ProviderError};
pub use metrics::ProviderMetrics;
pub use types::{CryptoCode, CurrencyCode, RateCacheEntry, Token};
pub use units::{bitcoin_to_satoshis, satoshis_to_bitcoin};
