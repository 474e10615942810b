//! Base OKX REST client: header generation for public and signed requests.

use crate::error::{NexusError, Result};
use crate::http::{build_http_client, handle_response};
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

pub const OKX_REST_URL: &str = "https://www.okx.com";

#[derive(Debug, Clone)]
struct Credentials {
    key: String,
    secret: String,
    passphrase: String,
}

/// A client for the OKX v5 REST API.
///
/// Public endpoints work without credentials; signed endpoints require
/// key/secret/passphrase. With `demo` set, requests carry the
/// `x-simulated-trading: 1` header.
#[derive(Debug, Clone)]
pub struct OkxRestClient {
    http_client: HttpClient,
    base_url: String,
    credentials: Option<Credentials>,
    demo: bool,
    debug: bool,
}

impl OkxRestClient {
    /// Creates a client for public endpoints only.
    pub fn new_public(base_url: &str, timeout_sec: Option<u64>, debug: bool) -> Result<Self> {
        if base_url.is_empty() {
            return Err(NexusError::ParameterRequiredError {
                param: "base_url".to_string(),
            });
        }
        Ok(Self {
            http_client: build_http_client(timeout_sec)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: None,
            demo: false,
            debug,
        })
    }

    /// Creates a client with signing credentials.
    pub fn new(
        base_url: &str,
        key: &str,
        secret: &str,
        passphrase: &str,
        demo: bool,
        timeout_sec: Option<u64>,
        debug: bool,
    ) -> Result<Self> {
        for (param, value) in [
            ("base_url", base_url),
            ("key", key),
            ("secret", secret),
            ("passphrase", passphrase),
        ] {
            if value.is_empty() {
                return Err(NexusError::ParameterRequiredError {
                    param: param.to_string(),
                });
            }
        }
        Ok(Self {
            http_client: build_http_client(timeout_sec)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Some(Credentials {
                key: key.to_string(),
                secret: secret.to_string(),
                passphrase: passphrase.to_string(),
            }),
            demo,
            debug,
        })
    }

    /// ISO-8601 millisecond timestamp signed into every private request.
    fn timestamp() -> String {
        Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }

    /// base64(HMAC-SHA256(secret, timestamp + method + requestPath + body)).
    pub(crate) fn sign(secret: &str, prehash: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| NexusError::AuthenticationError(format!("invalid HMAC key: {}", e)))?;
        mac.update(prehash.as_bytes());
        Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }

    fn pub_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        if self.demo {
            headers.insert(
                HeaderName::from_static("x-simulated-trading"),
                HeaderValue::from_static("1"),
            );
        }
        Ok(headers)
    }

    fn auth_headers(&self, method: &Method, request_path: &str, body: &str) -> Result<HeaderMap> {
        let creds = self.credentials.as_ref().ok_or_else(|| {
            NexusError::AuthenticationError("credentials required for private endpoint".to_string())
        })?;

        let timestamp = Self::timestamp();
        let prehash = format!("{}{}{}{}", timestamp, method.as_str(), request_path, body);
        let signature = Self::sign(&creds.secret, &prehash)?;

        let mut headers = self.pub_headers()?;
        headers.insert(
            HeaderName::from_static("ok-access-key"),
            HeaderValue::from_str(&creds.key)?,
        );
        headers.insert(
            HeaderName::from_static("ok-access-sign"),
            HeaderValue::from_str(&signature)?,
        );
        headers.insert(
            HeaderName::from_static("ok-access-timestamp"),
            HeaderValue::from_str(&timestamp)?,
        );
        headers.insert(
            HeaderName::from_static("ok-access-passphrase"),
            HeaderValue::from_str(&creds.passphrase)?,
        );
        Ok(headers)
    }

    fn request_path<Q: Serialize>(path: &str, query: Option<&Q>) -> Result<String> {
        Ok(match query {
            Some(q) => {
                let qs = serde_qs::to_string(q)?;
                if qs.is_empty() {
                    path.to_string()
                } else {
                    format!("{}?{}", path, qs)
                }
            }
            None => path.to_string(),
        })
    }

    pub(crate) async fn get_public<Q: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&Q>,
    ) -> Result<T> {
        let request_path = Self::request_path(path, query)?;
        let url = format!("{}{}", self.base_url, request_path);
        if self.debug {
            debug!(%url, "okx public request");
        }
        let response = self
            .http_client
            .get(&url)
            .headers(self.pub_headers()?)
            .send()
            .await?;
        handle_response(response).await
    }

    pub(crate) async fn get_signed<Q: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&Q>,
    ) -> Result<T> {
        let request_path = Self::request_path(path, query)?;
        let headers = self.auth_headers(&Method::GET, &request_path, "")?;
        let url = format!("{}{}", self.base_url, request_path);
        if self.debug {
            debug!(%url, "okx signed GET");
        }
        let response = self.http_client.get(&url).headers(headers).send().await?;
        handle_response(response).await
    }

    pub(crate) async fn post_signed<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        // Sign and send the exact same serialization.
        let body_str = serde_json::to_string(body)?;
        let headers = self.auth_headers(&Method::POST, path, &body_str)?;
        let url = format!("{}{}", self.base_url, path);
        if self.debug {
            debug!(%url, "okx signed POST");
        }
        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .body(body_str)
            .send()
            .await?;
        handle_response(response).await
    }
}
