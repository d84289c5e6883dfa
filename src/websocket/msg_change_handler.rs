use tracing::debug;

use crate::models::CodeChangeMessage;
use crate::relay::{ChangeEvent, ConnectionId, Relay};
use crate::websocket::transport::WsTransport;

/// Handle CodeChangeMessage
pub fn handle_code_change_message(change_msg: CodeChangeMessage, connection_id: &ConnectionId, relay: &Relay<WsTransport>) {
    let delivered = relay.on_change(connection_id, ChangeEvent::new(change_msg.payload));
    debug!("code-change from {} fanned out to {} peer(s)", connection_id, delivered);
}
