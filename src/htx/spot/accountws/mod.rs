//! Authenticated account WebSocket client for HTX spot.
//!
//! Same lifecycle as the market client, with an auth handshake inserted
//! into the startup sequence: after the tracked subscriptions are replayed,
//! an HMAC-SHA256-signed `req` frame goes out on channel "auth", and the
//! dispatcher force-closes the connection if the server rejects it. The
//! reconnect supervisor then retries the full handshake.

pub mod types;

use crate::error::{NexusError, Result};
use crate::htx::auth;
use crate::htx::spot::ws::{
    Action, AuthParams, AuthRequest, Frame, DIAL_TIMEOUT, MAX_TRY_TIMES, PONG_COOLDOWN,
    READ_LIMIT, RECONNECT_COOLDOWN, RETRY_STEP, STARTUP_GRACE,
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
use types::AccountEvent;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

type Listener = Box<dyn Fn(&AccountEvent) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct AccountWsConfig {
    pub base_url: String,
    pub key: String,
    pub secret: String,
    pub debug: bool,
    pub auto_reconnect: bool,
}

impl AccountWsConfig {
    pub fn new(base_url: String, key: String, secret: String) -> Self {
        Self {
            base_url,
            key,
            secret,
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

pub struct AccountWsClient {
    inner: Arc<Inner>,
}

struct Inner {
    base_url: String,
    host: String,
    key: String,
    secret: String,
    debug: bool,

    connected: RwLock<bool>,
    sink: Mutex<Option<WsSink>>,
    disconnect: StateMutex<Option<oneshot::Sender<()>>>,

    subscriptions: RwLock<HashSet<String>>,
    listeners: RwLock<HashMap<String, Vec<Listener>>>,

    cancel: CancellationToken,
}

impl AccountWsClient {
    /// Connects, runs the full startup sequence (auth included) and waits
    /// the short grace period so the dispatcher can see the first auth ack.
    pub async fn connect(cfg: AccountWsConfig) -> Result<Self> {
        for (param, value) in [
            ("base_url", &cfg.base_url),
            ("key", &cfg.key),
            ("secret", &cfg.secret),
        ] {
            if value.is_empty() {
                return Err(NexusError::ParameterRequiredError {
                    param: param.to_string(),
                });
            }
        }

        let parsed = url::Url::parse(&cfg.base_url)?;
        let host = match parsed.port() {
            Some(port) => format!("{}:{}", parsed.host_str().unwrap_or_default(), port),
            None => parsed.host_str().unwrap_or_default().to_string(),
        };

        let inner = Arc::new(Inner {
            base_url: cfg.base_url,
            host,
            key: cfg.key,
            secret: cfg.secret,
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
        handler: impl Fn(&AccountEvent) + Send + Sync + 'static,
    ) {
        self.inner
            .listeners
            .write()
            .entry(topic.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    pub async fn subscribe(&self, topic: &str) -> Result<()> {
        self.inner.subscribe(topic).await
    }

    pub async fn unsubscribe(&self, topic: &str) -> Result<()> {
        self.inner.unsubscribe(topic).await
    }

    pub fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    /// Permanently stops the client; the supervisor will not reconnect.
    pub async fn stop(&self) {
        info!("stopping account websocket client");
        self.inner.cancel.cancel();
        self.inner.close().await;
    }
}

impl Inner {
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
            warn!(error = %err, "resubscribe after connect failed");
        }

        // Send failure is logged but not fatal here; a rejected handshake
        // still closes the connection from the dispatcher side.
        if let Err(err) = self.auth().await {
            warn!(error = %err, "auth send failed");
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

                if !inner.dispatch(frame).await {
                    return;
                }
            }
        });
    }

    /// Returns false when the loop must terminate (rejected auth ack).
    async fn dispatch(&self, frame: Frame) -> bool {
        match frame.action {
            Action::Ping => {
                if let Err(err) = self.pong(frame.data).await {
                    error!(error = %err, "handle ping error");
                }
                true
            }
            Action::Sub => true,
            Action::Req => {
                if frame.ch == "auth" {
                    if frame.code != Some(200) {
                        error!(code = ?frame.code, "websocket auth rejected");
                        self.close().await;
                        return false;
                    }
                    info!("websocket auth success");
                }
                true
            }
            Action::Push => {
                if let Err(err) = self.handle(&frame.ch, frame.data.unwrap_or(Value::Null)) {
                    error!(channel = %frame.ch, error = %err, "handle message error");
                }
                true
            }
            _ => {
                error!(action = ?frame.action, ch = %frame.ch, "unrecognized frame");
                true
            }
        }
    }

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

    /// Signed auth handshake, sent under the send lock so it never
    /// interleaves with other outbound frames.
    async fn auth(&self) -> Result<()> {
        let timestamp = auth::utc_timestamp();
        let signature = auth::websocket_signature(
            &self.secret,
            &self.host,
            auth::WS_AUTH_PATH,
            &self.key,
            &timestamp,
        )?;

        let req = AuthRequest {
            action: Action::Req,
            ch: "auth".to_string(),
            params: AuthParams {
                auth_type: "api".to_string(),
                access_key: self.key.clone(),
                signature_method: auth::SIGNATURE_METHOD.to_string(),
                signature_version: auth::SIGNATURE_VERSION.to_string(),
                timestamp,
                signature,
            },
        };
        let text = serde_json::to_string(&req)?;

        let mut guard = self.sink.lock().await;
        if !self.is_connected() {
            return Err(NexusError::WsNotConnected);
        }
        let sink = guard.as_mut().ok_or(NexusError::WsNotConnected)?;

        sink.send(Message::Text(text))
            .await
            .map_err(|e| NexusError::WebsocketError(e.to_string()))
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
