use tokio::sync::mpsc::{error::TrySendError, Sender};

use crate::models::SendMessage;
use crate::relay::{ChangeEvent, DeliveryError, Transport};

/// Bounded outbound queue of one socket, drained by that socket's writer task
pub type WsTransport = Sender<SendMessage>;

impl Transport for Sender<SendMessage> {
    fn deliver(&self, event: &ChangeEvent) -> Result<(), DeliveryError> {
        self.try_send(SendMessage::ReceiveCode {
            payload: (*event.payload).clone(),
        })
        .map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::Full,
            TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }
}
