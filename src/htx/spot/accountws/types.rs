//! Typed payloads pushed on the HTX spot account channels, plus the
//! channel-name pattern decoder.

use crate::error::{NexusError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One decoded account push, tagged by message family.
#[derive(Debug, Clone)]
pub enum AccountEvent {
    OrderUpdate(OrderUpdate),
    TradeClearing(TradeClearing),
    AccountChange(AccountChange),
}

/// Push on `orders#{symbol}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub client_order_id: Option<String>,
    #[serde(default)]
    pub order_side: Option<String>,
    #[serde(default, rename = "type")]
    pub order_type: Option<String>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub order_price: Option<String>,
    #[serde(default)]
    pub order_size: Option<String>,
    #[serde(default)]
    pub order_value: Option<String>,
    #[serde(default)]
    pub order_create_time: Option<i64>,
    #[serde(default)]
    pub trade_price: Option<String>,
    #[serde(default)]
    pub trade_volume: Option<String>,
    #[serde(default)]
    pub trade_id: Option<i64>,
    #[serde(default)]
    pub trade_time: Option<i64>,
    #[serde(default)]
    pub aggressor: Option<bool>,
    #[serde(default)]
    pub rem_amt: Option<String>,
    #[serde(default)]
    pub exec_amt: Option<String>,
    #[serde(default)]
    pub last_act_time: Option<i64>,
    #[serde(default)]
    pub order_source: Option<String>,
    #[serde(default)]
    pub err_code: Option<i64>,
    #[serde(default)]
    pub err_message: Option<String>,
}

/// Push on `trade.clearing#{symbol}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeClearing {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub order_side: Option<String>,
    #[serde(default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub order_price: Option<String>,
    #[serde(default)]
    pub order_size: Option<String>,
    #[serde(default)]
    pub order_value: Option<String>,
    #[serde(default)]
    pub order_create_time: Option<i64>,
    #[serde(default)]
    pub trade_price: Option<String>,
    #[serde(default)]
    pub trade_volume: Option<String>,
    #[serde(default)]
    pub trade_id: Option<i64>,
    #[serde(default)]
    pub trade_time: Option<i64>,
    #[serde(default)]
    pub aggressor: Option<bool>,
    #[serde(default)]
    pub transact_fee: Option<String>,
    #[serde(default)]
    pub fee_currency: Option<String>,
    #[serde(default)]
    pub fee_deduct: Option<String>,
    #[serde(default)]
    pub fee_deduct_type: Option<String>,
    #[serde(default)]
    pub account_id: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Push on `accounts.update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountChange {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub account_id: i64,
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default)]
    pub available: Option<String>,
    #[serde(default)]
    pub change_type: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub seq_num: i64,
    #[serde(default)]
    pub change_time: Option<i64>,
}

/// Routes a raw push payload by channel-name substring.
pub fn decode(channel: &str, data: Value) -> Result<AccountEvent> {
    if channel.contains("trade.clearing#") {
        Ok(AccountEvent::TradeClearing(serde_json::from_value(data)?))
    } else if channel.contains("orders#") {
        Ok(AccountEvent::OrderUpdate(serde_json::from_value(data)?))
    } else if channel.contains("accounts.update") {
        Ok(AccountEvent::AccountChange(serde_json::from_value(data)?))
    } else {
        Err(NexusError::UnknownTopic(channel.to_string()))
    }
}
