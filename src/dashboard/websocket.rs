//! WebSocket handler for real-time dashboard updates

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::api::AppState;
use crate::chart::ChartFrame;
use crate::controller::DashboardView;
use crate::dashboard::types::{UpdateType, WebSocketUpdate};

/// Largest message forwarded to a client
const MAX_MESSAGE_BYTES: usize = 64 * 1024;

/// Handles WebSocket upgrade requests for dashboard real-time updates
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handles an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before taking the snapshot so no update falls in between
    let mut rx = state.ws_broadcast.subscribe();
    let snapshot = create_state_update(&state.controller.view());

    let send_task = tokio::spawn(async move {
        if let Some(text) = encode(&snapshot) {
            if sender.send(Message::Text(text)).await.is_err() {
                return;
            }
        }

        loop {
            match rx.recv().await {
                Ok(update) => {
                    let Some(text) = encode(&update) else {
                        continue;
                    };
                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "WebSocket client lagging, dropped updates");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Handle incoming messages (ping/pong, close)
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }
}

fn encode(update: &WebSocketUpdate) -> Option<String> {
    match serde_json::to_string(update) {
        Ok(json) if json.len() > MAX_MESSAGE_BYTES => {
            // Skip oversized messages instead of truncating to avoid malformed JSON
            tracing::warn!(bytes = json.len(), "WebSocket message exceeds size limit, skipping");
            None
        }
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to serialize WebSocket update: {}", e);
            None
        }
    }
}

/// Create a full dashboard state update message
pub fn create_state_update(view: &DashboardView) -> WebSocketUpdate {
    WebSocketUpdate {
        update_type: UpdateType::State,
        data: serde_json::to_value(view).unwrap_or(serde_json::Value::Null),
    }
}

/// Create a chart redraw update message
pub fn create_chart_update(frame: &ChartFrame) -> WebSocketUpdate {
    WebSocketUpdate {
        update_type: UpdateType::ChartUpdate,
        data: serde_json::to_value(frame).unwrap_or(serde_json::Value::Null),
    }
}
