//! Request parameters and typed responses for the OKX v5 endpoints.

use serde::{Deserialize, Serialize};

/// The `{code, msg, data}` envelope every v5 endpoint responds with.
/// `code` is "0" on success.
#[derive(Debug, Clone, Deserialize)]
pub struct OkxResponse<T> {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> OkxResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.code == "0"
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderParam {
    /// Instrument ID, e.g. BTC-USDT.
    pub inst_id: String,
    /// Trade mode: cross, isolated, cash, spot_isolated.
    pub td_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cl_ord_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// buy or sell.
    pub side: String,
    /// long or short; only for FUTURES/SWAP in long/short mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_side: Option<String>,
    /// market, limit, post_only, fok, ioc, optimal_limit_ioc.
    pub ord_type: String,
    pub sz: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub px: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reduce_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tgt_ccy: Option<String>,
    /// TP/SL information attached when placing the order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attach_algo_ords: Vec<AttachAlgoOrd>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachAlgoOrd {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach_algo_cl_ord_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp_trigger_px: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp_ord_px: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_trigger_px: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_ord_px: Option<String>,
    /// last, index or mark.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp_trigger_px_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_trigger_px_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sz: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderData {
    #[serde(default)]
    pub cl_ord_id: String,
    #[serde(default)]
    pub ord_id: String,
    #[serde(default)]
    pub tag: String,
    /// Per-order status code, "0" on success.
    #[serde(default)]
    pub s_code: String,
    #[serde(default)]
    pub s_msg: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderParam {
    pub inst_id: String,
    pub ord_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(default)]
    pub inst_type: String,
    #[serde(default)]
    pub inst_id: String,
    #[serde(default)]
    pub ccy: String,
    #[serde(default)]
    pub ord_id: String,
    #[serde(default)]
    pub cl_ord_id: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub px: String,
    #[serde(default)]
    pub sz: String,
    #[serde(default)]
    pub pnl: String,
    #[serde(default)]
    pub ord_type: String,
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub pos_side: String,
    #[serde(default)]
    pub td_mode: String,
    #[serde(default)]
    pub acc_fill_sz: String,
    #[serde(default)]
    pub fill_px: String,
    #[serde(default)]
    pub trade_id: String,
    #[serde(default)]
    pub fill_sz: String,
    #[serde(default)]
    pub fill_time: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub avg_px: String,
    #[serde(default)]
    pub lever: String,
    #[serde(default)]
    pub fee_ccy: String,
    #[serde(default)]
    pub fee: String,
    #[serde(default)]
    pub rebate_ccy: String,
    #[serde(default)]
    pub rebate: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub u_time: String,
    #[serde(default)]
    pub c_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetInstrumentsParam {
    /// SPOT, MARGIN, SWAP, FUTURES or OPTION.
    pub inst_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uly: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inst_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inst_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    #[serde(default)]
    pub inst_type: String,
    #[serde(default)]
    pub inst_id: String,
    #[serde(default)]
    pub uly: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub base_ccy: String,
    #[serde(default)]
    pub quote_ccy: String,
    #[serde(default)]
    pub settle_ccy: String,
    #[serde(default)]
    pub ct_val: String,
    #[serde(default)]
    pub ct_mult: String,
    #[serde(default)]
    pub list_time: String,
    #[serde(default)]
    pub exp_time: String,
    #[serde(default)]
    pub lever: String,
    #[serde(default)]
    pub tick_sz: String,
    #[serde(default)]
    pub lot_sz: String,
    #[serde(default)]
    pub min_sz: String,
    /// live, suspend, preopen or test.
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMarketTickersParam {
    pub inst_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uly: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inst_family: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTicker {
    #[serde(default)]
    pub inst_type: String,
    #[serde(default)]
    pub inst_id: String,
    #[serde(default)]
    pub last: String,
    #[serde(default)]
    pub last_sz: String,
    #[serde(default)]
    pub ask_px: String,
    #[serde(default)]
    pub ask_sz: String,
    #[serde(default)]
    pub bid_px: String,
    #[serde(default)]
    pub bid_sz: String,
    #[serde(default, rename = "open24h")]
    pub open_24h: String,
    #[serde(default, rename = "high24h")]
    pub high_24h: String,
    #[serde(default, rename = "low24h")]
    pub low_24h: String,
    #[serde(default, rename = "volCcy24h")]
    pub vol_ccy_24h: String,
    #[serde(default, rename = "vol24h")]
    pub vol_24h: String,
    #[serde(default)]
    pub ts: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIndexTickersParam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_ccy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inst_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexTicker {
    #[serde(default)]
    pub inst_id: String,
    #[serde(default)]
    pub idx_px: String,
    #[serde(default, rename = "high24h")]
    pub high_24h: String,
    #[serde(default, rename = "open24h")]
    pub open_24h: String,
    #[serde(default, rename = "low24h")]
    pub low_24h: String,
    #[serde(default, rename = "sodUtc0")]
    pub sod_utc0: String,
    #[serde(default, rename = "sodUtc8")]
    pub sod_utc8: String,
    #[serde(default)]
    pub ts: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_order_param_omits_empty_options() {
        let param = PlaceOrderParam {
            inst_id: "BTC-USDT".to_string(),
            td_mode: "cash".to_string(),
            side: "buy".to_string(),
            ord_type: "market".to_string(),
            sz: "10".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value["instId"], "BTC-USDT");
        assert!(value.get("clOrdId").is_none());
        assert!(value.get("reduceOnly").is_none());
        assert!(value.get("attachAlgoOrds").is_none());
    }

    #[test]
    fn envelope_reports_success_code() {
        let resp: OkxResponse<PlaceOrderData> = serde_json::from_str(
            r#"{"code":"0","msg":"","data":[{"clOrdId":"a","ordId":"1","tag":"","sCode":"0","sMsg":""}]}"#,
        )
        .unwrap();
        assert!(resp.is_ok());
        assert_eq!(resp.data[0].ord_id, "1");
    }
}
