//! services/api/src/web/ws_handler.rs
//!
//! This is the main entry point and control loop for a WebSocket connection.
//! It greets the client, forwards broadcast events, and dispatches inbound
//! submissions to the feedback pipeline.

use crate::web::{
    feedback_task::handle_submission,
    protocol::{ClientMessage, ServerMessage},
    state::AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{
    stream::{SplitSink, StreamExt},
    SinkExt,
};
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

/// The write half of a connection, shared between the pipeline (direct
/// responses) and the broadcast forwarder task.
pub type WsSender = Arc<Mutex<SplitSink<WebSocket, Message>>>;

/// Serializes and sends one server message on a connection.
pub(crate) async fn send_message(
    sender: &WsSender,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(message).unwrap();
    sender.lock().await.send(Message::Text(json.into())).await
}

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    let connection_id = Uuid::new_v4();
    info!("New WebSocket connection established: {connection_id}");

    // The sender is wrapped in an Arc<Mutex<>> to allow for shared mutable access across tasks.
    let (sender, mut receiver) = socket.split();
    let ws_sender: WsSender = Arc::new(Mutex::new(sender));

    // Subscribe before the greeting so no broadcast can slip past.
    let mut events = app_state.events.subscribe();

    let greeting = ServerMessage::ConnectionResponse {
        data: "Connected to server".to_string(),
    };
    if send_message(&ws_sender, &greeting).await.is_err() {
        info!("Client {connection_id} disconnected before the greeting was sent");
        return;
    }

    // --- Broadcast Forwarder Task ---
    // Drains the process-wide event channel into this connection's sink.
    let forward_handle = {
        let ws_sender = ws_sender.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(message) => {
                        if send_message(&ws_sender, &message).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Connection {connection_id} lagged; skipped {skipped} events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    };

    // --- Main Message Loop ---
    loop {
        if let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::NewFeedback { feedback }) => {
                        handle_submission(app_state.clone(), &ws_sender, feedback).await;
                    }
                    Err(e) => {
                        warn!("Failed to deserialize client message: {}", e);
                    }
                },
                Message::Close(_) => {
                    info!("Client {connection_id} sent close message.");
                    break;
                }
                _ => {}
            }
        } else {
            info!("Client {connection_id} disconnected.");
            break;
        }
    }

    // --- Cleanup ---
    forward_handle.abort();
    info!("WebSocket connection closed: {connection_id}");
}
