//! Typed payloads pushed on the HTX spot market channels, plus the
//! channel-name pattern decoder that turns a raw push payload into a
//! [`MarketEvent`].

use crate::error::{NexusError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One decoded market push, tagged by message family.
#[derive(Debug, Clone)]
pub enum MarketEvent {
    Kline(Kline),
    Ticker(Ticker),
    Depth(Depth),
    Bbo(Bbo),
    Trade(MarketTrade),
    MbpRefresh(MbpRefreshDepth),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kline {
    /// Bucket start, epoch seconds.
    pub id: i64,
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub close: f64,
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub high: f64,
    /// Base currency volume.
    #[serde(default)]
    pub amount: f64,
    /// Quote currency volume.
    #[serde(default)]
    pub vol: f64,
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub close: f64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub vol: f64,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub bid: f64,
    #[serde(default)]
    pub bid_size: f64,
    #[serde(default)]
    pub ask: f64,
    #[serde(default)]
    pub ask_size: f64,
    #[serde(default)]
    pub last_price: f64,
    #[serde(default)]
    pub last_size: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Depth {
    /// [price, size] levels, best first.
    #[serde(default)]
    pub bids: Vec<[f64; 2]>,
    #[serde(default)]
    pub asks: Vec<[f64; 2]>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub ts: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bbo {
    #[serde(default)]
    pub seq_id: i64,
    #[serde(default)]
    pub ask: f64,
    #[serde(default)]
    pub ask_size: f64,
    #[serde(default)]
    pub bid: f64,
    #[serde(default)]
    pub bid_size: f64,
    #[serde(default)]
    pub quote_time: i64,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketTrade {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub ts: i64,
    #[serde(default)]
    pub data: Vec<TradeTick>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeTick {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub ts: i64,
    #[serde(default)]
    pub trade_id: i64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub price: f64,
    /// "buy" or "sell", taker side.
    #[serde(default)]
    pub direction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MbpRefreshDepth {
    #[serde(default)]
    pub seq_num: i64,
    #[serde(default)]
    pub bids: Vec<[f64; 2]>,
    #[serde(default)]
    pub asks: Vec<[f64; 2]>,
}

/// Routes a raw push payload by channel-name substring.
///
/// `mbp.refresh` is checked before the generic cases so the refresh feed is
/// not shadowed by the `depth` pattern.
pub fn decode(channel: &str, data: Value) -> Result<MarketEvent> {
    if channel.contains("mbp") {
        if channel.contains("refresh") {
            return Ok(MarketEvent::MbpRefresh(serde_json::from_value(data)?));
        }
        return Err(NexusError::UnknownTopic(channel.to_string()));
    }

    if channel.contains("kline") {
        Ok(MarketEvent::Kline(serde_json::from_value(data)?))
    } else if channel.contains("bbo") {
        Ok(MarketEvent::Bbo(serde_json::from_value(data)?))
    } else if channel.contains("depth") {
        Ok(MarketEvent::Depth(serde_json::from_value(data)?))
    } else if channel.contains("ticker") {
        Ok(MarketEvent::Ticker(serde_json::from_value(data)?))
    } else if channel.contains("trade") {
        Ok(MarketEvent::Trade(serde_json::from_value(data)?))
    } else {
        Err(NexusError::UnknownTopic(channel.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn routes_kline_channel() {
        let data = json!({
            "id": 1690891200, "open": 29000.1, "close": 29010.2,
            "low": 28990.0, "high": 29020.5, "amount": 12.5,
            "vol": 362000.0, "count": 420
        });
        match decode("market.btcusdt.kline.1min", data).unwrap() {
            MarketEvent::Kline(k) => {
                assert_eq!(k.id, 1690891200);
                assert_eq!(k.count, 420);
            }
            other => panic!("expected kline, got {:?}", other),
        }
    }

    #[test]
    fn mbp_refresh_wins_over_depth_pattern() {
        let data = json!({"seqNum": 7, "bids": [[1.0, 2.0]], "asks": []});
        match decode("market.btcusdt.mbp.refresh.20", data).unwrap() {
            MarketEvent::MbpRefresh(d) => assert_eq!(d.seq_num, 7),
            other => panic!("expected mbp refresh, got {:?}", other),
        }
    }

    #[test]
    fn plain_mbp_channel_is_unknown() {
        let err = decode("market.btcusdt.mbp.5", json!({})).unwrap_err();
        assert!(matches!(err, NexusError::UnknownTopic(_)));
    }

    #[test]
    fn ticker_checked_before_trade() {
        // "ticker" channels never contain "trade" and vice versa, but the
        // ordering still matters for bbo vs depth naming; assert both route.
        let bbo = json!({"seqId": 1, "ask": 2.0, "askSize": 1.0, "bid": 1.9, "bidSize": 1.0, "quoteTime": 1, "symbol": "btcusdt"});
        assert!(matches!(
            decode("market.btcusdt.bbo", bbo).unwrap(),
            MarketEvent::Bbo(_)
        ));
        let trade = json!({"id": 1, "ts": 2, "data": [{"id": 1, "ts": 2, "tradeId": 3, "amount": 0.5, "price": 29000.0, "direction": "buy"}]});
        match decode("market.btcusdt.trade.detail", trade).unwrap() {
            MarketEvent::Trade(t) => assert_eq!(t.data[0].direction, "buy"),
            other => panic!("expected trade, got {:?}", other),
        }
    }

    #[test]
    fn unmatched_channel_is_unknown_topic() {
        let err = decode("market.btcusdt.etp", json!({})).unwrap_err();
        assert!(matches!(err, NexusError::UnknownTopic(_)));
    }
}
