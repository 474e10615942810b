//! Coin-margined futures account client. All endpoints are signed: the
//! query string (timestamp and recvWindow appended) is HMAC-SHA256 signed,
//! the hex digest travels as the `signature` parameter and the API key as
//! the `X-MBX-APIKEY` header.

use crate::binance::types::*;
use crate::error::{NexusError, Result};
use crate::http::{build_http_client, get_timestamp_ms, handle_response};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

pub const COINM_FUTURES_REST_URL: &str = "https://dapi.binance.com";

const RECV_WINDOW_MS: i64 = 5000;

#[derive(Debug, Clone)]
pub struct CoinMFuturesAccountClient {
    http_client: HttpClient,
    base_url: String,
    key: String,
    secret: String,
    debug: bool,
}

impl CoinMFuturesAccountClient {
    pub fn new(
        base_url: &str,
        key: &str,
        secret: &str,
        timeout_sec: Option<u64>,
        debug: bool,
    ) -> Result<Self> {
        for (param, value) in [("base_url", base_url), ("key", key), ("secret", secret)] {
            if value.is_empty() {
                return Err(NexusError::ParameterRequiredError {
                    param: param.to_string(),
                });
            }
        }
        Ok(Self {
            http_client: build_http_client(timeout_sec)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            secret: secret.to_string(),
            debug,
        })
    }

    pub(crate) fn sign(secret: &str, query: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| NexusError::AuthenticationError(format!("invalid HMAC key: {}", e)))?;
        mac.update(query.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-mbx-apikey"),
            HeaderValue::from_str(&self.key)?,
        );
        Ok(headers)
    }

    async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &str,
    ) -> Result<T> {
        let mut signed_query = if query.is_empty() {
            String::new()
        } else {
            format!("{}&", query)
        };
        signed_query.push_str(&format!(
            "recvWindow={}&timestamp={}",
            RECV_WINDOW_MS,
            get_timestamp_ms()
        ));
        let signature = Self::sign(&self.secret, &signed_query)?;

        let url = format!(
            "{}{}?{}&signature={}",
            self.base_url, path, signed_query, signature
        );
        if self.debug {
            debug!(%url, method = %method, "binance signed request");
        }

        let response = self
            .http_client
            .request(method, &url)
            .headers(self.headers()?)
            .send()
            .await?;
        handle_response(response).await
    }

    /// POST /dapi/v1/positionSide/dual
    pub async fn change_position_mode(
        &self,
        param: &ChangePositionModeParam,
    ) -> Result<ChangePositionModeResp> {
        let query = serde_qs::to_string(param)?;
        self.send_signed(Method::POST, "/dapi/v1/positionSide/dual", &query)
            .await
    }

    /// GET /dapi/v1/positionSide/dual
    pub async fn get_position_mode(&self) -> Result<PositionModeResp> {
        self.send_signed(Method::GET, "/dapi/v1/positionSide/dual", "")
            .await
    }
}
