//! WooX REST API client.

pub mod client;
pub mod private;
pub mod types;

pub use client::WooxClient;
