//! MEXC spot account client. Binance-style signing: hex HMAC-SHA256 over
//! the query string, `signature` parameter, `X-MEXC-APIKEY` header.

use crate::error::{NexusError, Result};
use crate::http::{build_http_client, get_timestamp_ms, handle_response};
use crate::mexc::types::*;
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

pub const MEXC_REST_URL: &str = "https://api.mexc.com";

#[derive(Debug, Clone)]
pub struct SpotAccountClient {
    http_client: HttpClient,
    base_url: String,
    key: String,
    secret: String,
    debug: bool,
}

impl SpotAccountClient {
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
            HeaderName::from_static("x-mexc-apikey"),
            HeaderValue::from_str(&self.key)?,
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }

    async fn send_signed<P: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &P,
    ) -> Result<T> {
        let qs = serde_qs::to_string(params)?;
        let signed_query = if qs.is_empty() {
            format!("timestamp={}", get_timestamp_ms())
        } else {
            format!("{}&timestamp={}", qs, get_timestamp_ms())
        };
        let signature = Self::sign(&self.secret, &signed_query)?;

        let url = format!(
            "{}{}?{}&signature={}",
            self.base_url, path, signed_query, signature
        );
        if self.debug {
            debug!(%url, method = %method, "mexc signed request");
        }

        let response = self
            .http_client
            .request(method, &url)
            .headers(self.headers()?)
            .send()
            .await?;
        handle_response(response).await
    }

    /// POST /api/v3/order
    pub async fn create_order(&self, param: &CreateOrderParam) -> Result<CreateOrderResp> {
        for (name, value) in [
            ("symbol", &param.symbol),
            ("side", &param.side),
            ("type", &param.order_type),
        ] {
            if value.is_empty() {
                return Err(NexusError::ParameterRequiredError {
                    param: name.to_string(),
                });
            }
        }
        self.send_signed(Method::POST, "/api/v3/order", param).await
    }

    /// GET /api/v3/order
    pub async fn query_order(&self, param: &QueryOrderParam) -> Result<Order> {
        if param.order_id.is_none() && param.orig_client_order_id.is_none() {
            return Err(NexusError::ParameterRequiredError {
                param: "orderId or origClientOrderId".to_string(),
            });
        }
        self.send_signed(Method::GET, "/api/v3/order", param).await
    }
}
