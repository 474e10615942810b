//! Public market-data WebSocket client for HTX spot.
//!
//! The client owns one logical connection. A single dispatcher task reads
//! frames and routes them (ping responder, push decoding, listener
//! delivery); a supervisor task waits for the disconnect signal and restarts
//! the whole startup sequence. The tracked subscription set survives
//! reconnects and is replayed on every new connection.
//!
//! ```no_run
//! use nexus_connector_rs::htx::spot::marketws::{MarketWsClient, MarketWsConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = MarketWsClient::connect(MarketWsConfig::new(
//!         "wss://api.huobi.pro/ws".to_string(),
//!     ))
//!     .await
//!     .expect("connect failed");
//!
//!     client.register_listener("market.btcusdt.ticker", |event| {
//!         println!("ticker: {:?}", event);
//!     });
//!     client.subscribe("market.btcusdt.ticker").await.expect("subscribe failed");
//!
//!     tokio::signal::ctrl_c().await.expect("ctrl_c");
//!     client.stop().await;
//! }
//! ```

pub mod types;

use crate::error::{NexusError, Result};
use crate::htx::spot::ws::{
    Action, Frame, DIAL_TIMEOUT, MAX_TRY_TIMES, PONG_COOLDOWN, READ_LIMIT, RECONNECT_COOLDOWN,
    RETRY_STEP, STARTUP_GRACE,
};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use parking_lot::{Mutex as StateMutex, RwLock};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{oneshot, Mutex};
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{
    connect_async_with_config,
    tungstenite::protocol::{Message, WebSocketConfig},
    MaybeTlsStream, WebSocketStream,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use types::MarketEvent;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

type Listener = Box<dyn Fn(&MarketEvent) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct MarketWsConfig {
    pub base_url: String,
    pub debug: bool,
    pub auto_reconnect: bool,
}

impl MarketWsConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            debug: false,
            auto_reconnect: true,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn without_reconnect(mut self) -> Self {
        self.auto_reconnect = false;
        self
    }
}

pub struct MarketWsClient {
    inner: Arc<Inner>,
}

struct Inner {
    base_url: String,
    debug: bool,

    connected: RwLock<bool>,
    // Send lock: every outbound frame goes through this mutex so writes
    // never interleave on the socket.
    sink: Mutex<Option<WsSink>>,
    // Latched disconnect signal for the current connection; taking the
    // sender makes close() idempotent.
    disconnect: StateMutex<Option<oneshot::Sender<()>>>,

    subscriptions: RwLock<HashSet<String>>,
    listeners: RwLock<HashMap<String, Vec<Listener>>>,

    cancel: CancellationToken,
}

impl MarketWsClient {
    /// Connects to the endpoint and returns a ready client, or a definitive
    /// construction error once all dial attempts are exhausted.
    pub async fn connect(cfg: MarketWsConfig) -> Result<Self> {
        if cfg.base_url.is_empty() {
            return Err(NexusError::ParameterRequiredError {
                param: "base_url".to_string(),
            });
        }
        url::Url::parse(&cfg.base_url)?;

        let inner = Arc::new(Inner {
            base_url: cfg.base_url,
            debug: cfg.debug,
            connected: RwLock::new(false),
            sink: Mutex::new(None),
            disconnect: StateMutex::new(None),
            subscriptions: RwLock::new(HashSet::new()),
            listeners: RwLock::new(HashMap::new()),
            cancel: CancellationToken::new(),
        });

        let disconnected = inner.start().await?;
        if cfg.auto_reconnect {
            inner.spawn_supervisor(disconnected);
        }

        sleep(STARTUP_GRACE).await;

        Ok(Self { inner })
    }

    /// Registers a handler for decoded pushes on `topic`. Handlers run on
    /// the dispatcher task, in arrival order.
    pub fn register_listener(
        &self,
        topic: &str,
        handler: impl Fn(&MarketEvent) + Send + Sync + 'static,
    ) {
        self.inner
            .listeners
            .write()
            .entry(topic.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// No-op success if the topic is already tracked; otherwise sends a
    /// subscribe frame and tracks the topic on send success.
    pub async fn subscribe(&self, topic: &str) -> Result<()> {
        self.inner.subscribe(topic).await
    }

    /// Sends an unsubscribe frame and untracks the topic unconditionally.
    pub async fn unsubscribe(&self, topic: &str) -> Result<()> {
        self.inner.unsubscribe(topic).await
    }

    pub fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    /// Permanently stops the client: cancels the governing context and
    /// closes the connection. The supervisor will not reconnect.
    pub async fn stop(&self) {
        info!("stopping market websocket client");
        self.inner.cancel.cancel();
        self.inner.close().await;
    }
}

impl Inner {
    /// Full startup sequence: connect with retry, replay subscriptions, then
    /// hand the read half to a fresh dispatcher. Returns the disconnect
    /// signal for this connection.
    async fn start(self: &Arc<Self>) -> Result<oneshot::Receiver<()>> {
        self.set_connected(false);
        *self.sink.lock().await = None;

        let stream = self.connect_with_retry().await?;
        let (sink, source) = stream.split();
        *self.sink.lock().await = Some(sink);
        self.set_connected(true);

        let (tx, rx) = oneshot::channel();
        *self.disconnect.lock() = Some(tx);

        if let Err(err) = self.resubscribe().await {
            // Failed topics stay tracked for the next reconnect.
            warn!(error = %err, "resubscribe after connect failed");
        }

        self.spawn_dispatcher(source);

        Ok(rx)
    }

    async fn connect_with_retry(&self) -> Result<WsStream> {
        let mut ws_config = WebSocketConfig::default();
        ws_config.max_message_size = Some(READ_LIMIT);

        for attempt in 0..MAX_TRY_TIMES {
            match timeout(
                DIAL_TIMEOUT,
                connect_async_with_config(self.base_url.as_str(), Some(ws_config)),
            )
            .await
            {
                Ok(Ok((stream, response))) => {
                    info!(status = %response.status(), "websocket connected");
                    return Ok(stream);
                }
                Ok(Err(err)) => info!(attempt, error = %err, "connect error"),
                Err(_) => info!(attempt, "connect timed out"),
            }
            sleep(RETRY_STEP * (attempt + 1)).await;
        }

        Err(NexusError::ConnectFailed {
            attempts: MAX_TRY_TIMES,
        })
    }

    /// One supervisor per client: waits for the current connection's
    /// disconnect signal, cools down, then re-runs the startup sequence
    /// unless the governing context has been cancelled.
    fn spawn_supervisor(self: &Arc<Self>, mut disconnected: oneshot::Receiver<()>) {
        let inner = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let _ = disconnected.await;

                inner.set_connected(false);
                info!("disconnect, then reconnect...");
                sleep(RECONNECT_COOLDOWN).await;

                if inner.cancel.is_cancelled() {
                    info!("client stopped, never reconnect");
                    return;
                }

                match inner.start().await {
                    Ok(rx) => disconnected = rx,
                    Err(err) => {
                        error!(error = %err, "reconnect failed");
                        return;
                    }
                }
            }
        });
    }

    /// Single reader loop: owns the exclusive right to read frames from the
    /// socket for this connection instance.
    fn spawn_dispatcher(self: &Arc<Self>, mut source: WsSource) {
        let inner = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let next = tokio::select! {
                    _ = inner.cancel.cancelled() => {
                        info!("context cancelled, closing websocket");
                        inner.close().await;
                        return;
                    }
                    next = source.next() => next,
                };

                let msg = match next {
                    Some(Ok(msg)) => msg,
                    Some(Err(err)) => {
                        error!(error = %err, "websocket read error");
                        inner.close().await;
                        return;
                    }
                    None => {
                        info!("websocket stream ended");
                        inner.close().await;
                        return;
                    }
                };

                let text = match msg {
                    Message::Text(text) => text,
                    Message::Close(frame) => {
                        warn!(?frame, "received close frame");
                        inner.close().await;
                        return;
                    }
                    _ => continue,
                };

                let frame: Frame = match serde_json::from_str(&text) {
                    Ok(frame) => frame,
                    Err(err) => {
                        error!(error = %err, "malformed frame");
                        continue;
                    }
                };

                inner.dispatch(frame).await;
            }
        });
    }

    async fn dispatch(&self, frame: Frame) {
        match frame.action {
            Action::Ping => {
                if let Err(err) = self.pong(frame.data).await {
                    error!(error = %err, "handle ping error");
                }
            }
            // Subscribe ack: success already implied by having sent the
            // request.
            Action::Sub => {}
            Action::Req => {
                debug!(ch = %frame.ch, code = ?frame.code, "request ack");
            }
            Action::Push => {
                if let Err(err) = self.handle(&frame.ch, frame.data.unwrap_or(Value::Null)) {
                    error!(channel = %frame.ch, error = %err, "handle message error");
                }
            }
            _ => {
                error!(action = ?frame.action, ch = %frame.ch, "unrecognized frame");
            }
        }
    }

    /// Decodes a push payload by channel pattern and delivers it to every
    /// registered listener for the channel. Decode failure is isolated to
    /// the single message.
    fn handle(&self, channel: &str, data: Value) -> Result<()> {
        if self.debug {
            debug!(channel, "push message");
        }

        let event = types::decode(channel, data)?;

        let listeners = self.listeners.read();
        if let Some(handlers) = listeners.get(channel) {
            for handler in handlers {
                handler(&event);
            }
        }

        Ok(())
    }

    /// The insert decides which of two concurrent subscribes to the same
    /// topic sends the frame; a failed send untracks again.
    async fn subscribe(&self, topic: &str) -> Result<()> {
        if !self.subscriptions.write().insert(topic.to_string()) {
            return Ok(());
        }

        if let Err(err) = self.send(&Frame::sub(topic)).await {
            self.subscriptions.write().remove(topic);
            return Err(err);
        }

        Ok(())
    }

    async fn unsubscribe(&self, topic: &str) -> Result<()> {
        self.send(&Frame::unsub(topic)).await?;
        self.subscriptions.write().remove(topic);

        Ok(())
    }

    /// Replays the full tracked set; failed topics are aggregated into one
    /// error and stay tracked.
    async fn resubscribe(&self) -> Result<()> {
        let topics: Vec<String> = self.subscriptions.read().iter().cloned().collect();
        if topics.is_empty() {
            return Ok(());
        }

        let mut redo = Vec::new();
        for topic in topics {
            if self.send(&Frame::sub(&topic)).await.is_err() {
                redo.push(topic);
            }
        }

        if redo.is_empty() {
            Ok(())
        } else {
            Err(NexusError::ResubscribeError(redo))
        }
    }

    async fn send(&self, frame: &Frame) -> Result<()> {
        let text = serde_json::to_string(frame)?;

        let mut guard = self.sink.lock().await;
        if !self.is_connected() {
            return Err(NexusError::WsNotConnected);
        }
        let sink = guard.as_mut().ok_or(NexusError::WsNotConnected)?;

        sink.send(Message::Text(text))
            .await
            .map_err(|e| NexusError::WebsocketError(e.to_string()))
    }

    /// Replies to a ping with its payload, then holds the send lock for the
    /// mandatory cooldown so no other frame goes out during it.
    async fn pong(&self, data: Option<Value>) -> Result<()> {
        let text = serde_json::to_string(&Frame::pong(data))?;

        let mut guard = self.sink.lock().await;
        if !self.is_connected() {
            return Err(NexusError::WsNotConnected);
        }
        let sink = guard.as_mut().ok_or(NexusError::WsNotConnected)?;

        sink.send(Message::Text(text))
            .await
            .map_err(|e| NexusError::WebsocketError(e.to_string()))?;

        sleep(PONG_COOLDOWN).await;

        Ok(())
    }

    /// Signals the disconnect event (idempotent) and closes the socket.
    async fn close(&self) {
        if let Some(tx) = self.disconnect.lock().take() {
            let _ = tx.send(());
        }

        if let Some(mut sink) = self.sink.lock().await.take() {
            if let Err(err) = sink.close().await {
                warn!(error = %err, "websocket close error");
            }
        }
    }

    fn set_connected(&self, state: bool) {
        *self.connected.write() = state;
    }

    fn is_connected(&self) -> bool {
        *self.connected.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disconnected_inner(topics: &[&str]) -> Inner {
        Inner {
            base_url: "ws://127.0.0.1:9".to_string(),
            debug: false,
            connected: RwLock::new(false),
            sink: Mutex::new(None),
            disconnect: StateMutex::new(None),
            subscriptions: RwLock::new(topics.iter().map(|t| t.to_string()).collect()),
            listeners: RwLock::new(HashMap::new()),
            cancel: CancellationToken::new(),
        }
    }

    #[tokio::test]
    async fn resubscribe_aggregates_failures_and_keeps_topics_tracked() {
        let inner = disconnected_inner(&["market.btcusdt.kline.1min", "market.ethusdt.bbo"]);

        match inner.resubscribe().await.unwrap_err() {
            NexusError::ResubscribeError(mut topics) => {
                topics.sort();
                assert_eq!(topics, vec!["market.btcusdt.kline.1min", "market.ethusdt.bbo"]);
            }
            other => panic!("expected resubscribe error, got {:?}", other),
        }

        let tracked = inner.subscriptions.read();
        assert!(tracked.contains("market.btcusdt.kline.1min"));
        assert!(tracked.contains("market.ethusdt.bbo"));
    }

    #[tokio::test]
    async fn resubscribe_with_empty_set_is_a_no_op() {
        let inner = disconnected_inner(&[]);
        assert!(inner.resubscribe().await.is_ok());
    }

    #[tokio::test]
    async fn failed_subscribe_does_not_track_the_topic() {
        let inner = disconnected_inner(&[]);
        let err = inner.subscribe("market.btcusdt.ticker").await.unwrap_err();
        assert!(matches!(err, NexusError::WsNotConnected));
        assert!(inner.subscriptions.read().is_empty());
    }
}
