use super::{ConnectionId, Relay, Transport};

/// Unregisters a connection when dropped, so a connection task that ends for
/// any reason (close frame, socket error, abort) always leaves the relay.
pub struct ConnectionGuard<T: Transport> {
    relay: Relay<T>,
    id: ConnectionId,
}

impl<T: Transport> ConnectionGuard<T> {
    pub fn new(relay: Relay<T>, id: ConnectionId) -> Self {
        Self { relay, id }
    }
}

impl<T: Transport> Drop for ConnectionGuard<T> {
    fn drop(&mut self) {
        self.relay.on_disconnect(&self.id);
    }
}
