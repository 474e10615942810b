//! HTX WebSocket authentication: canonical-string construction and the
//! HMAC-SHA256 signature sent with the `auth` handshake.

use crate::error::{NexusError, Result};
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The fixed path signed for WebSocket authentication.
pub const WS_AUTH_PATH: &str = "/ws/v2";

pub const SIGNATURE_METHOD: &str = "HmacSHA256";
pub const SIGNATURE_VERSION: &str = "2.1";

/// Current UTC time formatted to second precision, the format HTX expects
/// in the signed `timestamp` parameter.
pub fn utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Builds the canonical string `GET\n{host}\n{path}\n{sorted query}` and
/// returns the base64-encoded HMAC-SHA256 digest over it.
///
/// The query parameters are percent-encoded and already in sorted key order
/// (accessKey < signatureMethod < signatureVersion < timestamp).
pub fn websocket_signature(
    secret: &str,
    host: &str,
    path: &str,
    access_key: &str,
    timestamp: &str,
) -> Result<String> {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("accessKey", access_key)
        .append_pair("signatureMethod", SIGNATURE_METHOD)
        .append_pair("signatureVersion", SIGNATURE_VERSION)
        .append_pair("timestamp", timestamp)
        .finish();

    let canonical = format!("GET\n{}\n{}\n{}", host, path, query);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| NexusError::AuthenticationError(format!("invalid HMAC key: {}", e)))?;
    mac.update(canonical.as_bytes());

    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}
