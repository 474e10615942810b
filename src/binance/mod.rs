//! Binance coin-margined futures REST API client.

pub mod coinm_futures;
pub mod types;

pub use coinm_futures::CoinMFuturesAccountClient;
