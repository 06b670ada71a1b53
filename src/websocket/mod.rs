//! WebSocket support for real-time alert delivery
//!
//! Triggered alerts and high-risk flags are fanned out to every
//! connected dashboard client over a broadcast channel.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{broadcast, mpsc, RwLock};
use uuid::Uuid;

use crate::risk::RiskLevel;
use crate::rules::model::Alert;

/// Events pushed to connected dashboard clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertEvent {
    /// An alert rule matched a screened wallet
    AlertTriggered { alert: Alert },

    /// A screening put a wallet into the high risk level
    WalletFlagged {
        address: String,
        score: u8,
        level: RiskLevel,
    },
}

/// Messages accepted from clients
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Ping,
}

/// Messages sent to clients
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Event { event: AlertEvent },
    Pong,
}

/// Connected client metadata
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub client_id: String,
    pub connected_at: DateTime<Utc>,
}

/// Shared WebSocket state
#[derive(Clone)]
pub struct WsState {
    event_tx: broadcast::Sender<AlertEvent>,
    clients: Arc<RwLock<HashMap<String, ClientInfo>>>,
}

impl WsState {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(128);
        WsState {
            event_tx,
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fan an event out to every connected client
    pub fn broadcast(&self, event: AlertEvent) {
        // A send error only means nobody is connected right now
        if self.event_tx.send(event).is_err() {
            tracing::debug!("No WebSocket clients connected, event dropped");
        }
    }

    /// Subscribe to the event stream
    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.event_tx.subscribe()
    }

    /// Number of currently connected clients
    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    async fn register_client(&self, client_id: String) {
        let info = ClientInfo {
            client_id: client_id.clone(),
            connected_at: Utc::now(),
        };
        self.clients.write().await.insert(client_id.clone(), info);
        tracing::info!(client = %client_id, "WebSocket client connected");
    }

    async fn unregister_client(&self, client_id: &str) {
        self.clients.write().await.remove(client_id);
        tracing::info!(client = %client_id, "WebSocket client disconnected");
    }
}

impl Default for WsState {
    fn default() -> Self {
        Self::new()
    }
}

/// WebSocket upgrade handler for `/ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WsState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: WsState) {
    let client_id = Uuid::new_v4().to_string();
    state.register_client(client_id.clone()).await;

    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.subscribe();

    // Internal channel for replies produced by the receive side
    let (internal_tx, mut internal_rx) = mpsc::channel::<ServerMessage>(32);

    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                Ok(event) = rx.recv() => {
                    let msg = ServerMessage::Event { event };
                    if let Ok(text) = serde_json::to_string(&msg) {
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                }
                Some(msg) = internal_rx.recv() => {
                    if let Ok(text) = serde_json::to_string(&msg) {
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                }
                else => break,
            }
        }
    });

    let client_id_recv = client_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Text(text) = msg {
                if let Ok(ClientMessage::Ping) = serde_json::from_str::<ClientMessage>(&text) {
                    tracing::debug!(client = %client_id_recv, "Ping from client");
                    let _ = internal_tx.send(ServerMessage::Pong).await;
                }
            } else if let Message::Close(_) = msg {
                break;
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    state.unregister_client(&client_id).await;
}
