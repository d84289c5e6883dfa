use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{ChangeEvent, ConnectionId, JoinOutcome, RelayState, SessionId, Transport};

/// Counters exposed through diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RelayStats {
    pub connections: usize,
    pub sessions: usize,
}

/// Shared handle to the relay.
///
/// The state mutex is held for one registry operation at a time and never
/// across a fan-out: `on_change` snapshots the recipients, releases the lock
/// and only then delivers.
pub struct Relay<T> {
    state: Arc<Mutex<RelayState<T>>>,
}

impl<T> Clone for Relay<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Transport> Relay<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RelayState::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RelayState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn on_connect(&self, id: ConnectionId, transport: T) {
        if self.lock().register(id, transport) {
            info!("Connection {} registered", id);
        } else {
            debug!("Connection {} already registered", id);
        }
    }

    /// Fan `event` out to every other member of the sender's session.
    /// Returns the number of recipients the event was handed to.
    pub fn on_change(&self, sender: &ConnectionId, event: ChangeEvent) -> usize {
        let recipients = self.lock().recipients(sender);
        if recipients.is_empty() {
            debug!("No recipients for change from {}", sender);
            return 0;
        }

        let mut delivered = 0;
        for (id, transport) in recipients {
            match transport.deliver(&event) {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Delivery from {} to {} failed: {}", sender, id, e),
            }
        }
        debug!("Change from {} delivered to {} peer(s)", sender, delivered);
        delivered
    }

    pub fn on_disconnect(&self, id: &ConnectionId) {
        match self.lock().unregister(id) {
            Some(session) => info!("Connection {} disconnected from session {}", id, session),
            None => debug!("Connection {} disconnected", id),
        }
    }

    pub fn join(&self, id: &ConnectionId, session: SessionId) -> JoinOutcome {
        let outcome = self.lock().join(id, session.clone());
        match &outcome {
            JoinOutcome::Joined { previous: Some(prev) } => {
                info!("Connection {} moved from session {} to {}", id, prev, session)
            }
            JoinOutcome::Joined { previous: None } => {
                info!("Connection {} joined session {}", id, session)
            }
            JoinOutcome::AlreadyMember => debug!("Connection {} already in session {}", id, session),
            JoinOutcome::UnknownConnection => debug!("Join from unknown connection {}", id),
        }
        outcome
    }

    pub fn leave(&self, id: &ConnectionId) -> Option<SessionId> {
        let left = self.lock().leave(id);
        if let Some(session) = &left {
            info!("Connection {} left session {}", id, session);
        }
        left
    }

    pub fn members_of(&self, session: &SessionId) -> Vec<ConnectionId> {
        self.lock().members_of(session)
    }

    pub fn stats(&self) -> RelayStats {
        let state = self.lock();
        RelayStats {
            connections: state.connection_count(),
            sessions: state.session_count(),
        }
    }
}

impl<T: Transport> Default for Relay<T> {
    fn default() -> Self {
        Self::new()
    }
}
