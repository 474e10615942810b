// tests/htx_market_ws.rs
//
// Drives the market websocket client against an in-process mock exchange.
mod common;

use futures_util::{SinkExt, StreamExt};
use nexus_connector_rs::htx::spot::marketws::types::MarketEvent;
use nexus_connector_rs::htx::spot::marketws::{MarketWsClient, MarketWsConfig};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Duration};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    (listener, url)
}

async fn accept(listener: &TcpListener) -> WebSocketStream<TcpStream> {
    let (stream, _) = listener.accept().await.unwrap();
    accept_async(stream).await.unwrap()
}

async fn next_json(ws: &mut WebSocketStream<TcpStream>) -> Value {
    loop {
        match timeout(Duration::from_secs(5), ws.next()).await.unwrap() {
            Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).unwrap(),
            Some(Ok(_)) => continue,
            other => panic!("expected a text frame, got {:?}", other),
        }
    }
}

async fn send_json(ws: &mut WebSocketStream<TcpStream>, value: Value) {
    ws.send(Message::Text(value.to_string())).await.unwrap();
}

#[tokio::test]
async fn subscribe_is_idempotent_and_unsubscribe_untracks() {
    common::setup();
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let mut frames = Vec::new();
        while let Some(Ok(msg)) = ws.next().await {
            if let Message::Text(text) = msg {
                frames.push(serde_json::from_str::<Value>(&text).unwrap());
            }
        }
        frames
    });

    let client = MarketWsClient::connect(MarketWsConfig::new(url).without_reconnect())
        .await
        .unwrap();
    assert!(client.is_connected());

    client.subscribe("market.btcusdt.kline.1min").await.unwrap();
    client.subscribe("market.btcusdt.kline.1min").await.unwrap();
    client
        .unsubscribe("market.btcusdt.kline.1min")
        .await
        .unwrap();
    client.stop().await;

    let frames = timeout(Duration::from_secs(5), server)
        .await
        .unwrap()
        .unwrap();
    let subs: Vec<&Value> = frames.iter().filter(|f| f["action"] == "sub").collect();
    assert_eq!(subs.len(), 1, "duplicate subscribe must not hit the wire");
    assert_eq!(subs[0]["ch"], "market.btcusdt.kline.1min");
    assert!(frames
        .iter()
        .any(|f| f["action"] == "unsub" && f["ch"] == "market.btcusdt.kline.1min"));
}

#[tokio::test]
async fn ping_is_answered_with_matching_pong() {
    common::setup();
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        send_json(&mut ws, json!({"action": "ping", "data": {"ts": 1690891200123i64}})).await;
        let pong = next_json(&mut ws).await;
        assert_eq!(pong["action"], "pong");
        assert_eq!(pong["data"]["ts"], 1690891200123i64);
        ws
    });

    let client = MarketWsClient::connect(MarketWsConfig::new(url).without_reconnect())
        .await
        .unwrap();
    let _ws = timeout(Duration::from_secs(5), server)
        .await
        .unwrap()
        .unwrap();
    client.stop().await;
}

#[tokio::test]
async fn pong_cooldown_blocks_other_outbound_frames() {
    common::setup();
    let (listener, url) = bind().await;

    let (client, mut ws) = tokio::join!(
        MarketWsClient::connect(MarketWsConfig::new(url).without_reconnect()),
        accept(&listener)
    );
    let client = client.unwrap();

    send_json(&mut ws, json!({"action": "ping", "data": {"ts": 1}})).await;
    let pong = next_json(&mut ws).await;
    assert_eq!(pong["action"], "pong");
    // The cooldown is now running under the send lock; a subscribe fired
    // during it must not reach the wire before it elapses.
    let pong_seen = std::time::Instant::now();

    let (sub_result, frame) = tokio::join!(
        client.subscribe("market.btcusdt.kline.1min"),
        next_json(&mut ws)
    );
    let gap = pong_seen.elapsed();
    sub_result.unwrap();
    assert_eq!(frame["action"], "sub");
    assert!(
        gap >= Duration::from_millis(80),
        "sub frame arrived {}ms after the pong",
        gap.as_millis()
    );

    client.stop().await;
}

#[tokio::test]
async fn concurrent_subscribes_send_a_single_frame() {
    common::setup();
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let mut frames = Vec::new();
        while let Some(Ok(msg)) = ws.next().await {
            if let Message::Text(text) = msg {
                frames.push(serde_json::from_str::<Value>(&text).unwrap());
            }
        }
        frames
    });

    let client = MarketWsClient::connect(MarketWsConfig::new(url).without_reconnect())
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        client.subscribe("market.btcusdt.bbo"),
        client.subscribe("market.btcusdt.bbo")
    );
    first.unwrap();
    second.unwrap();
    client.stop().await;

    let frames = timeout(Duration::from_secs(5), server)
        .await
        .unwrap()
        .unwrap();
    let subs = frames.iter().filter(|f| f["action"] == "sub").count();
    assert_eq!(subs, 1, "exactly one sub frame may hit the wire");
}

#[tokio::test]
async fn push_is_delivered_and_bad_push_does_not_kill_the_stream() {
    common::setup();
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let sub = next_json(&mut ws).await;
        assert_eq!(sub["action"], "sub");
        send_json(
            &mut ws,
            json!({"action": "sub", "ch": "market.btcusdt.kline.1min", "code": 200}),
        )
        .await;

        // Undecodable channel first: the dispatcher must survive it.
        send_json(
            &mut ws,
            json!({"action": "push", "ch": "market.btcusdt.etp", "data": {}}),
        )
        .await;
        send_json(
            &mut ws,
            json!({
                "action": "push",
                "ch": "market.btcusdt.kline.1min",
                "data": {
                    "id": 1690891200, "open": 29000.1, "close": 29010.2,
                    "low": 28990.0, "high": 29020.5, "amount": 12.5,
                    "vol": 362000.0, "count": 420
                }
            }),
        )
        .await;
        ws
    });

    let client = MarketWsClient::connect(MarketWsConfig::new(url).without_reconnect())
        .await
        .unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    client.register_listener("market.btcusdt.kline.1min", move |event| {
        if let MarketEvent::Kline(kline) = event {
            let _ = tx.send(kline.id);
        }
    });
    client.subscribe("market.btcusdt.kline.1min").await.unwrap();

    let id = timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(id, 1690891200);
    assert!(client.is_connected());

    let _ws = server.await.unwrap();
    client.stop().await;
}

#[tokio::test]
async fn reconnect_replays_tracked_subscriptions() {
    common::setup();
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        let sub = next_json(&mut ws).await;
        assert_eq!(sub["ch"], "market.btcusdt.kline.1min");
        drop(ws);

        let mut ws = accept(&listener).await;
        let replay = next_json(&mut ws).await;
        assert_eq!(replay["action"], "sub");
        assert_eq!(replay["ch"], "market.btcusdt.kline.1min");
        ws
    });

    let client = MarketWsClient::connect(MarketWsConfig::new(url)).await.unwrap();
    client.subscribe("market.btcusdt.kline.1min").await.unwrap();

    let _ws = timeout(Duration::from_secs(10), server)
        .await
        .unwrap()
        .unwrap();
    sleep(Duration::from_millis(200)).await;
    assert!(client.is_connected());
    client.stop().await;
}

#[tokio::test]
async fn is_connected_tracks_disconnect_and_reconnect() {
    common::setup();
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        let ws = accept(&listener).await;
        drop(ws);
        accept(&listener).await
    });

    let client = MarketWsClient::connect(MarketWsConfig::new(url)).await.unwrap();

    // Server dropped the first connection; the supervisor flips the flag
    // before the reconnect cooldown elapses.
    sleep(Duration::from_millis(400)).await;
    assert!(!client.is_connected());

    sleep(Duration::from_millis(1500)).await;
    assert!(client.is_connected());

    let _ws = server.await.unwrap();
    client.stop().await;
}

#[tokio::test]
async fn stop_halts_reconnection() {
    common::setup();
    let (listener, url) = bind().await;

    let (client, ws) = tokio::join!(
        MarketWsClient::connect(MarketWsConfig::new(url)),
        accept(&listener)
    );
    let client = client.unwrap();
    assert!(client.is_connected());

    client.stop().await;
    drop(ws);

    // The reconnect cooldown is one second; no new dial may arrive after it.
    let second = timeout(Duration::from_secs(2), listener.accept()).await;
    assert!(second.is_err(), "stopped client must not reconnect");
    assert!(!client.is_connected());
}
