// tests/okx_rest.rs
mod common;

use mockito::Matcher;
use nexus_connector_rs::okx::client::OkxRestClient;
use nexus_connector_rs::okx::types::{
    GetInstrumentsParam, GetOrderParam, PlaceOrderParam,
};
use nexus_connector_rs::NexusError;

#[tokio::test]
async fn place_order_sends_signed_headers_and_parses_response() {
    common::setup();
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/v5/trade/order")
        .match_header("ok-access-key", "test-key")
        .match_header("ok-access-passphrase", "test-pass")
        .match_header("ok-access-sign", Matcher::Regex(".+".to_string()))
        .match_header("ok-access-timestamp", Matcher::Regex(r"\d{4}-\d{2}-\d{2}T.+Z".to_string()))
        .match_header("x-simulated-trading", "1")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "instId": "BTC-USDT",
            "tdMode": "cash",
            "side": "buy",
            "ordType": "limit",
            "sz": "0.01",
            "px": "30000"
        })))
        .with_status(200)
        .with_body(
            r#"{"code":"0","msg":"","data":[{"clOrdId":"abc","ordId":"312269865356374016","tag":"","sCode":"0","sMsg":""}]}"#,
        )
        .create_async()
        .await;

    let client = OkxRestClient::new(
        &server.url(),
        "test-key",
        "test-secret",
        "test-pass",
        true,
        None,
        false,
    )
    .unwrap();

    let param = PlaceOrderParam {
        inst_id: "BTC-USDT".to_string(),
        td_mode: "cash".to_string(),
        side: "buy".to_string(),
        ord_type: "limit".to_string(),
        sz: "0.01".to_string(),
        px: Some("30000".to_string()),
        ..Default::default()
    };
    let resp = client.place_order(&param).await.unwrap();

    assert!(resp.is_ok());
    assert_eq!(resp.data[0].ord_id, "312269865356374016");
    mock.assert_async().await;
}

#[tokio::test]
async fn place_order_rejects_missing_required_fields() {
    common::setup();
    let client =
        OkxRestClient::new("https://example.com", "k", "s", "p", false, None, false).unwrap();

    let param = PlaceOrderParam {
        inst_id: "BTC-USDT".to_string(),
        ..Default::default()
    };
    let err = client.place_order(&param).await.unwrap_err();
    assert!(matches!(err, NexusError::ParameterRequiredError { .. }));
}

#[tokio::test]
async fn get_order_signs_the_query_string() {
    common::setup();
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v5/trade/order")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("instId".to_string(), "BTC-USDT".to_string()),
            Matcher::UrlEncoded("ordId".to_string(), "312269865356374016".to_string()),
        ]))
        .match_header("ok-access-sign", Matcher::Regex(".+".to_string()))
        .with_status(200)
        .with_body(
            r#"{"code":"0","msg":"","data":[{"instType":"SPOT","instId":"BTC-USDT","ordId":"312269865356374016","state":"live"}]}"#,
        )
        .create_async()
        .await;

    let client = OkxRestClient::new(&server.url(), "k", "s", "p", false, None, false).unwrap();
    let param = GetOrderParam {
        inst_id: "BTC-USDT".to_string(),
        ord_id: "312269865356374016".to_string(),
    };
    let resp = client.get_order(&param).await.unwrap();

    assert_eq!(resp.data[0].state, "live");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_instruments_is_unsigned() {
    common::setup();
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v5/public/instruments")
        .match_query(Matcher::UrlEncoded(
            "instType".to_string(),
            "SPOT".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"code":"0","msg":"","data":[{"instType":"SPOT","instId":"BTC-USDT","state":"live"}]}"#)
        .create_async()
        .await;

    let client = OkxRestClient::new_public(&server.url(), None, false).unwrap();
    let param = GetInstrumentsParam {
        inst_type: "SPOT".to_string(),
        uly: None,
        inst_family: None,
        inst_id: None,
    };
    let resp = client.get_instruments(&param).await.unwrap();

    assert_eq!(resp.data[0].inst_id, "BTC-USDT");
    mock.assert_async().await;
}

#[tokio::test]
async fn error_envelope_maps_to_client_error() {
    common::setup();
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/v5/public/instruments")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"code":"51000","msg":"Parameter instType error"}"#)
        .create_async()
        .await;

    let client = OkxRestClient::new_public(&server.url(), None, false).unwrap();
    let param = GetInstrumentsParam {
        inst_type: "BOGUS".to_string(),
        uly: None,
        inst_family: None,
        inst_id: None,
    };
    let err = client.get_instruments(&param).await.unwrap_err();

    match err {
        NexusError::ClientError { code, message, .. } => {
            assert_eq!(code, 51000);
            assert!(message.contains("instType"));
        }
        other => panic!("expected client error, got {:?}", other),
    }
}
