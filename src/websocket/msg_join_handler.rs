use tracing::error;

use crate::models::SendMessage;
use crate::relay::{ConnectionId, JoinOutcome, Relay, SessionId};
use crate::websocket::transport::WsTransport;

/// Handle JoinMessage. The client gets a `joined` ack once membership is in
/// place, including when it was already a member.
pub fn handle_join_message(session: SessionId, connection_id: &ConnectionId, relay: &Relay<WsTransport>, sender: &WsTransport) {
    match relay.join(connection_id, session.clone()) {
        JoinOutcome::Joined { .. } | JoinOutcome::AlreadyMember => {
            if sender.try_send(SendMessage::Joined { session }).is_err() {
                error!("Failed to send joined ack to {}", connection_id);
            }
        }
        JoinOutcome::UnknownConnection => {
            error!("Join for unregistered connection {}", connection_id);
        }
    }
}

/// Handle LeaveMessage
pub fn handle_leave_message(connection_id: &ConnectionId, relay: &Relay<WsTransport>, sender: &WsTransport) {
    relay.leave(connection_id);
    if sender.try_send(SendMessage::Left).is_err() {
        error!("Failed to send left ack to {}", connection_id);
    }
}
