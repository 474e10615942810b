//! Shared REST plumbing used by every exchange client: HTTP client
//! construction, timestamping and the success/error response split.

use crate::error::{NexusError, Result};
use chrono::Utc;
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub(crate) const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Builds the underlying reqwest client with the configured timeout.
pub(crate) fn build_http_client(timeout_sec: Option<u64>) -> Result<HttpClient> {
    let timeout_duration = Duration::from_secs(timeout_sec.unwrap_or(DEFAULT_TIMEOUT_SECONDS));
    Ok(HttpClient::builder().timeout(timeout_duration).build()?)
}

/// Gets the current UTC timestamp in milliseconds since the Unix epoch.
pub fn get_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Shared logic to handle response status and body parsing.
///
/// A 2xx response is deserialized into `T`. Anything else is probed for the
/// exchanges' usual `code` and `msg`/`message` fields and mapped onto
/// [`NexusError::ClientError`] / [`NexusError::ServerError`] with the
/// response headers attached.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let headers = response.headers().clone();

    if status.is_success() {
        let parsed_body = response.json::<T>().await?;
        return Ok(parsed_body);
    }

    let error_body: Value = match response.json::<Value>().await {
        Ok(val) => val,
        Err(_) => {
            let message = format!(
                "Request failed with status {} (could not parse error body)",
                status
            );
            return Err(if status.is_client_error() {
                NexusError::ClientError {
                    status,
                    code: 0,
                    message,
                    data: None,
                    header: headers,
                }
            } else {
                NexusError::ServerError {
                    status,
                    code: 0,
                    message,
                    header: headers,
                }
            });
        }
    };

    // Some exchanges send `code` as a number, others as a string ("50011").
    let code = error_body["code"]
        .as_i64()
        .or_else(|| error_body["code"].as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0);
    let message = error_body["msg"]
        .as_str()
        .or_else(|| error_body["message"].as_str())
        .unwrap_or("Unknown error message")
        .to_string();
    let data = error_body.get("data").cloned();

    Err(if status.is_client_error() {
        NexusError::ClientError {
            status,
            code,
            message,
            data,
            header: headers,
        }
    } else {
        NexusError::ServerError {
            status,
            code,
            message,
            header: headers,
        }
    })
}
