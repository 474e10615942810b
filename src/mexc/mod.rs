//! MEXC spot REST API client.

pub mod spot;
pub mod types;

pub use spot::SpotAccountClient;
