//! Base WooX REST client. Two signing schemes coexist:
//!
//! - V1: hex HMAC-SHA256 over the sorted request parameters joined by `&`,
//!   a `|` separator and the millisecond timestamp; parameters travel as
//!   form-urlencoded bodies (or the query string on GET).
//! - V3: hex HMAC-SHA256 over `timestamp + method + path + body` with JSON
//!   bodies.

use crate::error::{NexusError, Result};
use crate::http::{build_http_client, get_timestamp_ms, handle_response};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

pub const WOOX_REST_URL: &str = "https://api.woo.org";

#[derive(Debug, Clone)]
pub struct WooxClient {
    http_client: HttpClient,
    base_url: String,
    key: String,
    secret: String,
    debug: bool,
}

impl WooxClient {
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

    fn sign_hex(secret: &str, payload: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| NexusError::AuthenticationError(format!("invalid HMAC key: {}", e)))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Sorts `k=v` pairs so the signed string is canonical regardless of
    /// struct field order.
    fn sorted_query(qs: &str) -> String {
        let mut pairs: Vec<&str> = qs.split('&').filter(|s| !s.is_empty()).collect();
        pairs.sort_unstable();
        pairs.join("&")
    }

    pub(crate) fn v1_signature(secret: &str, qs: &str, timestamp: i64) -> Result<String> {
        let payload = format!("{}|{}", Self::sorted_query(qs), timestamp);
        Self::sign_hex(secret, &payload)
    }

    pub(crate) fn v3_signature(
        secret: &str,
        timestamp: i64,
        method: &Method,
        path: &str,
        body: &str,
    ) -> Result<String> {
        let payload = format!("{}{}{}{}", timestamp, method.as_str(), path, body);
        Self::sign_hex(secret, &payload)
    }

    fn v1_headers(&self, signature: &str, timestamp: i64) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_str(&self.key)?,
        );
        headers.insert(
            HeaderName::from_static("x-api-signature"),
            HeaderValue::from_str(signature)?,
        );
        headers.insert(
            HeaderName::from_static("x-api-timestamp"),
            HeaderValue::from_str(&timestamp.to_string())?,
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        Ok(headers)
    }

    /// V1 request: parameters signed sorted and sent as the query string
    /// (GET) or a form body (POST/DELETE).
    pub(crate) async fn send_v1<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Option<&B>,
    ) -> Result<T> {
        let qs = match params {
            Some(p) => serde_qs::to_string(p)?,
            None => String::new(),
        };
        let sorted = Self::sorted_query(&qs);
        let timestamp = get_timestamp_ms();
        let signature = Self::v1_signature(&self.secret, &sorted, timestamp)?;
        let headers = self.v1_headers(&signature, timestamp)?;

        let url = if method == Method::GET && !sorted.is_empty() {
            format!("{}{}?{}", self.base_url, path, sorted)
        } else {
            format!("{}{}", self.base_url, path)
        };
        if self.debug {
            debug!(%url, method = %method, "woox v1 request");
        }

        let mut builder = self.http_client.request(method.clone(), &url).headers(headers);
        if method != Method::GET && !sorted.is_empty() {
            builder = builder.body(sorted);
        }

        handle_response(builder.send().await?).await
    }

    /// V3 request: JSON body, signature over timestamp+method+path+body.
    pub(crate) async fn send_v3<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let body_str = match body {
            Some(b) => serde_json::to_string(b)?,
            None => String::new(),
        };
        let timestamp = get_timestamp_ms();
        let signature = Self::v3_signature(&self.secret, timestamp, &method, path, &body_str)?;

        let mut headers = self.v1_headers(&signature, timestamp)?;
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let url = format!("{}{}", self.base_url, path);
        if self.debug {
            debug!(%url, method = %method, "woox v3 request");
        }

        let mut builder = self.http_client.request(method, &url).headers(headers);
        if !body_str.is_empty() {
            builder = builder.body(body_str);
        }

        handle_response(builder.send().await?).await
    }
}
