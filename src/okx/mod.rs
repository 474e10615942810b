//! OKX v5 REST API clients.

pub mod client;
pub mod public_data;
pub mod trade;
pub mod types;

pub use client::OkxRestClient;
