use std::sync::Arc;
use axum::{
    extract::{Path, Query, State, ws::{Message, WebSocket, WebSocketUpgrade}},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{info, error, warn};
use futures_util::{StreamExt, SinkExt};

use crate::auth::Identity;
use crate::config::Config;
use crate::models::{ReceivedMessage, SendMessage};
use crate::relay::{ConnectionGuard, ConnectionId, Relay, SessionId};
use crate::services::auth_service::{authenticate, token_from_headers, AuthError};
use crate::state::AppState;
use crate::websocket::msg_change_handler::handle_code_change_message;
use crate::websocket::msg_join_handler::{handle_join_message, handle_leave_message};
use crate::websocket::msg_ping_handler::handle_ping_message;
use crate::websocket::transport::WsTransport;

#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: Option<String>,
}

/// Decide whether a connection may be admitted.
///
/// A presented token must verify. Without one the connection is admitted as
/// anonymous only when the configuration allows it.
pub fn admit(config: &Config, token: Option<&str>) -> Result<Option<Identity>, StatusCode> {
    let Some(token) = token else {
        if config.ws_allow_anonymous {
            return Ok(None);
        }
        warn!("Rejecting anonymous WebSocket connection");
        return Err(StatusCode::UNAUTHORIZED);
    };

    match authenticate(token, config.auth_jwt_secret.as_deref()) {
        Ok(identity) => Ok(Some(identity)),
        Err(AuthError::MissingSecret) if config.ws_allow_anonymous => {
            warn!("Token presented but no JWT secret configured, admitting as anonymous");
            Ok(None)
        }
        Err(AuthError::MissingSecret) => {
            error!("Auth JWT secret not configured");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            error!("WebSocket token rejected: {}", e);
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

fn upgrade(
    ws: WebSocketUpgrade,
    session: Option<SessionId>,
    params: WsParams,
    headers: &HeaderMap,
    state: Arc<AppState>,
) -> Response {
    let token = params.token.or_else(|| token_from_headers(headers));
    let identity = match admit(&state.config, token.as_deref()) {
        Ok(identity) => identity,
        Err(status) => return status.into_response(),
    };
    ws.on_upgrade(move |socket| handle_socket(socket, session, identity, state))
}

/// WebSocket handler for a connection that picks its session later
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    info!("New WebSocket connection attempt");
    upgrade(ws, None, params, &headers, state)
}

/// WebSocket handler that joins the snippet's session right away
pub async fn websocket_session_handler(
    Path(session_id): Path<String>,
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    info!("New WebSocket connection attempt for session {}", session_id);
    upgrade(ws, Some(SessionId::from(session_id)), params, &headers, state)
}

fn handle_text(text: &str, connection_id: &ConnectionId, relay: &Relay<WsTransport>, sender: &WsTransport) {
    let msg: ReceivedMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            error!("Failed to parse message from {}: {}", connection_id, e);
            return;
        }
    };

    match msg {
        ReceivedMessage::Join(join_msg) => handle_join_message(join_msg.session, connection_id, relay, sender),
        ReceivedMessage::Leave => handle_leave_message(connection_id, relay, sender),
        ReceivedMessage::CodeChange(change_msg) => handle_code_change_message(change_msg, connection_id, relay),
        ReceivedMessage::Ping => handle_ping_message(connection_id, sender),
    }
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, session: Option<SessionId>, identity: Option<Identity>, state: Arc<AppState>) {
    let connection_id = ConnectionId::new();
    let who = identity.map(|i| i.user_id).unwrap_or_else(|| "anonymous".to_string());
    info!("WebSocket connection established: {} ({})", connection_id, who);

    let (mut sink, mut stream) = socket.split();

    // Outbound queue; fan-out never waits on this socket and a client that
    // stops reading misses events once the queue is full
    let (tx, mut rx) = mpsc::channel::<SendMessage>(state.config.ws_outbound_buffer.max(1));

    let relay = state.relay.clone();
    relay.on_connect(connection_id, tx.clone());
    let _guard = ConnectionGuard::new(relay.clone(), connection_id);

    if let Some(session) = session {
        handle_join_message(session, &connection_id, &relay, &tx);
    }

    // Drain the outbound queue into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to serialize outbound message: {}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // Read client frames until close, error or end of stream
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(frame)) = stream.next().await {
            match frame {
                Message::Text(text) => handle_text(&text, &connection_id, &relay, &tx),
                Message::Close(_) => break,
                _ => continue,
            }
        }
    });

    // Wait for either task to finish (and finish the other)
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };
    info!("WebSocket connection terminated: {}", connection_id);
}
