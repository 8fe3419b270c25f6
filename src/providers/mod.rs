//! Rate provider implementations

pub mod coinbase;
pub mod coindesk;
pub mod cryptocompare;
pub mod xchain;

pub use coinbase::CoinbaseProvider;
pub use coindesk::CoindeskProvider;
pub use cryptocompare::CryptoCompareProvider;
pub use xchain::XchainProvider;
