//! Wire envelope and tunables shared by the HTX spot WebSocket clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::Duration;

/// Maximum connect attempts during one startup sequence.
pub const MAX_TRY_TIMES: u32 = 5;
/// Bounded dial timeout per attempt.
pub const DIAL_TIMEOUT: Duration = Duration::from_secs(10);
/// Linear backoff step between connect attempts: (attempt + 1) * step.
pub const RETRY_STEP: Duration = Duration::from_secs(5);
/// Cool-down between a disconnect and the reconnect attempt.
pub const RECONNECT_COOLDOWN: Duration = Duration::from_secs(1);
/// Mandatory delay after a pong frame, held under the send lock.
/// Rate limit: https://www.htx.com/en-us/opend/newApiPages/?id=662
pub const PONG_COOLDOWN: Duration = Duration::from_millis(100);
/// Grace period after startup so the dispatcher can process the first
/// auth acknowledgment before the constructor returns.
pub const STARTUP_GRACE: Duration = Duration::from_millis(100);
/// Bounded read-frame size.
pub const READ_LIMIT: usize = 32768 * 64;

/// Action tag carried by every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Ping,
    Pong,
    Sub,
    Unsub,
    Req,
    Push,
    #[serde(other)]
    Unknown,
}

/// The wire envelope: action tag, channel name, status code and an opaque
/// payload decoded later per channel convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub action: Action,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Frame {
    pub fn sub(topic: &str) -> Self {
        Self {
            action: Action::Sub,
            ch: topic.to_string(),
            code: None,
            data: None,
        }
    }

    pub fn unsub(topic: &str) -> Self {
        Self {
            action: Action::Unsub,
            ch: topic.to_string(),
            code: None,
            data: None,
        }
    }

    pub fn pong(data: Option<Value>) -> Self {
        Self {
            action: Action::Pong,
            ch: String::new(),
            code: None,
            data,
        }
    }
}

/// Outbound auth handshake sent as a `req` on channel "auth".
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub action: Action,
    pub ch: String,
    pub params: AuthParams,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthParams {
    pub auth_type: String,
    pub access_key: String,
    pub signature_method: String,
    pub signature_version: String,
    pub timestamp: String,
    pub signature: String,
}
