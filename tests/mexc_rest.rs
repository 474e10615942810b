// tests/mexc_rest.rs
mod common;

use mockito::Matcher;
use nexus_connector_rs::mexc::spot::SpotAccountClient;
use nexus_connector_rs::mexc::types::{CreateOrderParam, QueryOrderParam};
use nexus_connector_rs::NexusError;

#[tokio::test]
async fn create_order_signs_the_query() {
    common::setup();
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/v3/order")
        .match_header("x-mexc-apikey", "test-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("symbol".to_string(), "BTCUSDT".to_string()),
            Matcher::UrlEncoded("side".to_string(), "BUY".to_string()),
            Matcher::UrlEncoded("type".to_string(), "LIMIT".to_string()),
            Matcher::Regex("timestamp=\\d{13}".to_string()),
            Matcher::Regex("signature=[0-9a-f]{64}".to_string()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"symbol":"BTCUSDT","orderId":"1196315350023612316","orderListId":-1,"price":"30000","origQty":"0.001","type":"LIMIT","side":"BUY","transactTime":1690891200123}"#,
        )
        .create_async()
        .await;

    let client = SpotAccountClient::new(&server.url(), "test-key", "test-secret", None, false)
        .unwrap();
    let param = CreateOrderParam {
        symbol: "BTCUSDT".to_string(),
        side: "BUY".to_string(),
        order_type: "LIMIT".to_string(),
        quantity: Some(0.001),
        price: Some(30000.0),
        ..Default::default()
    };
    let resp = client.create_order(&param).await.unwrap();

    assert_eq!(resp.order_id, "1196315350023612316");
    assert_eq!(resp.side, "BUY");
    mock.assert_async().await;
}

#[tokio::test]
async fn query_order_requires_an_order_reference() {
    common::setup();
    let client =
        SpotAccountClient::new("https://example.com", "k", "s", None, false).unwrap();

    let err = client
        .query_order(&QueryOrderParam {
            symbol: "BTCUSDT".to_string(),
            order_id: None,
            orig_client_order_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, NexusError::ParameterRequiredError { .. }));
}

#[tokio::test]
async fn query_order_parses_the_order() {
    common::setup();
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v3/order")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("symbol".to_string(), "BTCUSDT".to_string()),
            Matcher::UrlEncoded("orderId".to_string(), "1196315350023612316".to_string()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"symbol":"BTCUSDT","orderId":"1196315350023612316","price":"30000","origQty":"0.001","executedQty":"0","cummulativeQuoteQty":"0","status":"NEW","type":"LIMIT","side":"BUY","time":1690891200123,"updateTime":1690891200123,"isWorking":true}"#,
        )
        .create_async()
        .await;

    let client = SpotAccountClient::new(&server.url(), "test-key", "test-secret", None, false)
        .unwrap();
    let order = client
        .query_order(&QueryOrderParam {
            symbol: "BTCUSDT".to_string(),
            order_id: Some("1196315350023612316".to_string()),
            orig_client_order_id: None,
        })
        .await
        .unwrap();

    assert_eq!(order.status, "NEW");
    assert!(order.is_working);
    mock.assert_async().await;
}
