//! Request parameters and typed responses for the WooX endpoints.
//! WooX JSON uses snake_case field names throughout, so the struct fields
//! map directly.

use serde::{Deserialize, Serialize};

/// Minimal `{success}` envelope returned by mutation endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct WooxResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub records_per_page: i64,
    #[serde(default)]
    pub current_page: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SendOrderReq {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_tag: Option<String>,
    /// LIMIT, MARKET, IOC, FOK, POST_ONLY or ASK/BID.
    pub order_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    /// BUY or SELL.
    pub side: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendOrderResp {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub order_id: i64,
    #[serde(default)]
    pub client_order_id: i64,
    #[serde(default)]
    pub order_type: String,
    #[serde(default)]
    pub order_price: Option<f64>,
    #[serde(default)]
    pub order_quantity: Option<f64>,
    #[serde(default)]
    pub order_amount: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderParam {
    pub order_id: i64,
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderByClientOrderIdParam {
    pub client_order_id: i64,
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelOrdersParam {
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResp {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderInfo {
    #[serde(default)]
    pub order_id: i64,
    #[serde(default)]
    pub client_order_id: i64,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub order_type: Option<String>,
    #[serde(default, rename = "type")]
    pub type_field: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub executed: Option<f64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_fee: Option<f64>,
    #[serde(default)]
    pub fee_asset: Option<String>,
    #[serde(default)]
    pub visible: Option<f64>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub updated_time: Option<String>,
    #[serde(default)]
    pub average_executed_price: Option<f64>,
    #[serde(default)]
    pub reduce_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetOrdersParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetOrdersResp {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default = "Vec::new")]
    pub rows: Vec<OrderInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub order_id: i64,
    #[serde(default)]
    pub executed_price: f64,
    #[serde(default)]
    pub executed_quantity: f64,
    #[serde(default)]
    pub is_maker: Option<i64>,
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub fee_asset: String,
    #[serde(default)]
    pub executed_timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetTradeResp {
    #[serde(default)]
    pub success: bool,
    #[serde(flatten)]
    pub trade: TradeRecord,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetTradeHistoryParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_t: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_t: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetTradeHistoryResp {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default = "Vec::new")]
    pub rows: Vec<TradeRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalancesResp {
    #[serde(default)]
    pub success: bool,
    pub data: BalancesData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalancesData {
    #[serde(default = "Vec::new")]
    pub holding: Vec<Holding>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Holding {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub holding: f64,
    #[serde(default)]
    pub frozen: f64,
    #[serde(default)]
    pub interest: f64,
    #[serde(default)]
    pub pending_short_qty: f64,
    #[serde(default)]
    pub pending_long_qty: f64,
    #[serde(default)]
    pub available_balance: f64,
    #[serde(default)]
    pub updated_time: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfoResp {
    #[serde(default)]
    pub success: bool,
    pub data: AccountInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub application_id: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub account_mode: String,
    #[serde(default)]
    pub leverage: f64,
    #[serde(default)]
    pub taker_fee_rate: f64,
    #[serde(default)]
    pub maker_fee_rate: f64,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub futures_leverage: f64,
    #[serde(default)]
    pub futures_taker_fee_rate: f64,
    #[serde(default)]
    pub futures_maker_fee_rate: f64,
    #[serde(default)]
    pub margin_ratio: f64,
    #[serde(default)]
    pub free_collateral: f64,
    #[serde(default)]
    pub total_collateral: f64,
    #[serde(default)]
    pub total_account_value: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetAssetHistoryParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    pub type_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_t: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_t: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetHistoryRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub token_side: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "type")]
    pub type_field: String,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub updated_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetHistoryResp {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default = "Vec::new")]
    pub rows: Vec<AssetHistoryRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubAccount {
    #[serde(default)]
    pub application_id: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub created_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubAccountsResp {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub rows: Vec<SubAccount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferAssetParam {
    pub token: String,
    pub amount: f64,
    pub from_application_id: String,
    pub to_application_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferAssetResp {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateLeverageParam {
    pub leverage: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpRestrictionRow {
    #[serde(default)]
    pub ip_list: Option<String>,
    #[serde(default)]
    pub application_id: String,
    #[serde(default)]
    pub restrict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpRestrictionResp {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub rows: Vec<IpRestrictionRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub holding: f64,
    #[serde(default)]
    pub pending_long_qty: f64,
    #[serde(default)]
    pub pending_short_qty: f64,
    #[serde(default)]
    pub settle_price: f64,
    #[serde(default)]
    pub average_open_price: f64,
    #[serde(default)]
    pub pnl_24_h: f64,
    #[serde(default)]
    pub fee_24_h: f64,
    #[serde(default)]
    pub mark_price: f64,
    #[serde(default)]
    pub est_liq_price: f64,
    #[serde(default)]
    pub timestamp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetOnePositionResp {
    #[serde(default)]
    pub success: bool,
    pub data: Position,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetAllPositionsResp {
    #[serde(default)]
    pub success: bool,
    pub data: PositionsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionsData {
    #[serde(default = "Vec::new")]
    pub positions: Vec<Position>,
}
