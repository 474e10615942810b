//! HTX (Huobi) API clients.

pub mod auth;
pub mod spot;
