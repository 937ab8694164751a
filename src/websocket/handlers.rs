use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::{error, warn};
use uuid::Uuid;

use crate::models::Role;
use crate::services::chat_service::ChatService;
use crate::state::AppState;
use crate::websocket::message_types::ChatFrame;
use crate::websocket::routing::delivery_targets;
use crate::websocket::{ConnectionInfo, ConnectionRegistry};

/// Principal for the session, already validated by the identity layer.
/// `user_id` is absent for anonymous citizens.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub user_id: Option<Uuid>,
    pub role: Role,
}

pub async fn ws_handler(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, params, socket))
}

/// Unregisters the connection when the session task ends, on every exit
/// path. The registry must never retain a dead connection.
struct RegistrationGuard {
    registry: ConnectionRegistry,
    connection_id: Uuid,
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        let registry = self.registry.clone();
        let connection_id = self.connection_id;
        tokio::spawn(async move {
            registry.unregister(connection_id).await;
        });
    }
}

async fn handle_socket(state: AppState, params: WsParams, socket: WebSocket) {
    let connection_id = Uuid::new_v4();
    let me = ConnectionInfo {
        id: connection_id,
        user_id: params.user_id,
        role: params.role,
    };

    let mut rx = state
        .registry
        .register(connection_id, params.user_id, params.role)
        .await;
    let _guard = RegistrationGuard {
        registry: state.registry.clone(),
        connection_id,
    };

    tracing::info!(connection = %connection_id, role = ?params.role, "websocket session started");

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            // Messages routed to this connection
            maybe = rx.recv() => {
                match maybe {
                    Some(payload) => {
                        if sender.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // Frames from the client, processed strictly in arrival order
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        handle_chat_frame(&state, &me, &text).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(connection = %connection_id, error = %e, "websocket receive failed");
                        break;
                    }
                }
            }
        }
    }

    tracing::info!(connection = %connection_id, "websocket session ended");
}

/// Persist, then fan out to a fresh registry snapshot. The message is
/// durable whether or not anyone is live to receive it; a rejected frame
/// leaves the connection open.
async fn handle_chat_frame(state: &AppState, sender: &ConnectionInfo, text: &str) {
    let frame: ChatFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            warn!(connection = %sender.id, error = %e, "rejecting malformed chat frame");
            return;
        }
    };
    if frame.message.is_empty() {
        warn!(connection = %sender.id, "rejecting empty chat message");
        return;
    }

    let message = match ChatService::create_message(
        &state.db,
        &state.encryption,
        sender.user_id,
        frame.recipient_id,
        &frame.message,
    )
    .await
    {
        Ok(message) => message,
        Err(e) => {
            // Detail stays server-side; an unpersisted message is never delivered.
            error!(connection = %sender.id, error = %e, "failed to persist chat message");
            return;
        }
    };

    let payload = match serde_json::to_string(&message) {
        Ok(payload) => payload,
        Err(e) => {
            error!(message_id = %message.id, error = %e, "failed to serialize chat message");
            return;
        }
    };

    let live = state.registry.snapshot().await;
    let targets = delivery_targets(sender, frame.recipient_id, &live);
    state.registry.deliver(&targets, &payload).await;
}
