//! Parameters and responses for the coin-margined futures account
//! endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePositionModeParam {
    /// "true": hedge mode, "false": one-way mode.
    pub dual_side_position: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePositionModeResp {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionModeResp {
    pub dual_side_position: bool,
}
