//! Multi-exchange cryptocurrency API client library.
//!
//! Each top-level module wraps one exchange's published HTTP/WebSocket API:
//! request construction, authentication signatures and typed response
//! deserialization. The HTX spot module additionally carries the
//! authenticated WebSocket clients with auto-reconnect, resubscription and
//! listener-based event dispatch.

pub mod binance;
pub mod bitfinex;
pub mod error;
pub mod htx;
pub mod http;
pub mod mexc;
pub mod okx;
pub mod woox;

pub use error::{NexusError, Result};
