use tracing::{debug, error};
use chrono::Utc;

use crate::models::{PongMessage, SendMessage};
use crate::relay::ConnectionId;
use crate::websocket::transport::WsTransport;

/// Handle PingMessage
pub fn handle_ping_message(connection_id: &ConnectionId, sender: &WsTransport) {
    debug!("Ping received from {}", connection_id);

    // Reply with pong
    let pong = SendMessage::Pong(PongMessage { date: Utc::now().to_rfc3339() });
    if sender.try_send(pong).is_err() {
        error!("Failed to send Pong message to {}", connection_id);
    }
}
