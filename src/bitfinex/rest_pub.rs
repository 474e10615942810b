//! Bitfinex public REST endpoints. The v2 API responds with bare JSON
//! arrays rather than keyed objects.

use crate::error::{NexusError, Result};
use crate::http::{build_http_client, handle_response};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::debug;

pub const BITFINEX_REST_URL: &str = "https://api-pub.bitfinex.com";

/// 1 when the platform is operative, 0 during maintenance.
pub type PlatformStatus = Vec<i64>;

/// One row of `/v2/tickers`; trading and funding rows have different
/// arities, so the cells stay untyped.
pub type TickerRow = Vec<Value>;

#[derive(Debug, Clone)]
pub struct RestPubClient {
    http_client: HttpClient,
    base_url: String,
    debug: bool,
}

impl RestPubClient {
    pub fn new(base_url: &str, timeout_sec: Option<u64>, debug: bool) -> Result<Self> {
        if base_url.is_empty() {
            return Err(NexusError::ParameterRequiredError {
                param: "base_url".to_string(),
            });
        }
        Ok(Self {
            http_client: build_http_client(timeout_sec)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            debug,
        })
    }

    /// GET /v2/platform/status
    pub async fn platform_status(&self) -> Result<PlatformStatus> {
        let url = format!("{}/v2/platform/status", self.base_url);
        if self.debug {
            debug!(%url, "bitfinex public request");
        }
        let response = self.http_client.get(&url).send().await?;
        handle_response(response).await
    }

    /// GET /v2/tickers?symbols=...
    ///
    /// `symbols` is a comma-separated list, or "ALL".
    pub async fn get_tickers(&self, symbols: &str) -> Result<Vec<TickerRow>> {
        if symbols.is_empty() {
            return Err(NexusError::ParameterRequiredError {
                param: "symbols".to_string(),
            });
        }
        let url = format!("{}/v2/tickers?symbols={}", self.base_url, symbols);
        if self.debug {
            debug!(%url, "bitfinex public request");
        }
        let response = self.http_client.get(&url).send().await?;
        handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_rows_parse_mixed_cells() {
        let rows: Vec<TickerRow> = serde_json::from_str(
            r#"[["tBTCUSD",29000.1,10.5,29001.2,8.2,100.0,0.003,29050.0,1200.5,29500.0,28800.0]]"#,
        )
        .unwrap();
        assert_eq!(rows[0][0], "tBTCUSD");
        assert!(rows[0][1].as_f64().unwrap() > 0.0);
    }
}
