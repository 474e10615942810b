// tests/live_public.rs
//
// Hits real public endpoints. Ignored by default; run with
// `cargo test -- --ignored` when network access is available.
mod common;

use nexus_connector_rs::bitfinex::rest_pub::{RestPubClient, BITFINEX_REST_URL};
use nexus_connector_rs::okx::client::{OkxRestClient, OKX_REST_URL};
use nexus_connector_rs::okx::types::{GetInstrumentsParam, GetMarketTickersParam};

#[tokio::test]
#[ignore]
async fn bitfinex_platform_status_is_operative() {
    common::setup();
    let client = RestPubClient::new(BITFINEX_REST_URL, None, false).unwrap();
    let status = client.platform_status().await.unwrap();
    assert_eq!(status, vec![1]);
}

#[tokio::test]
#[ignore]
async fn okx_spot_instruments_are_listed() {
    common::setup();
    let client = OkxRestClient::new_public(OKX_REST_URL, None, false).unwrap();
    let resp = client
        .get_instruments(&GetInstrumentsParam {
            inst_type: "SPOT".to_string(),
            uly: None,
            inst_family: None,
            inst_id: Some("BTC-USDT".to_string()),
        })
        .await
        .unwrap();
    assert!(resp.is_ok());
    assert_eq!(resp.data[0].inst_id, "BTC-USDT");
}

#[tokio::test]
#[ignore]
async fn okx_spot_tickers_are_listed() {
    common::setup();
    let client = OkxRestClient::new_public(OKX_REST_URL, None, false).unwrap();
    let resp = client
        .get_market_tickers(&GetMarketTickersParam {
            inst_type: "SPOT".to_string(),
            uly: None,
            inst_family: None,
        })
        .await
        .unwrap();
    assert!(resp.is_ok());
    assert!(!resp.data.is_empty());
}
