//! Bitfinex public REST API client.

pub mod rest_pub;

pub use rest_pub::RestPubClient;
