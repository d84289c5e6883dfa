use std::collections::HashMap;

use super::{ConnectionId, SessionId};

/// State of one live connection
#[derive(Clone, Debug)]
pub struct Connection<T> {
    pub id: ConnectionId,
    pub session: Option<SessionId>,
    pub live: bool,
    pub transport: T,
}

/// Mapping from connection identifier to connection state.
///
/// Unknown identifiers are never an error: disconnect races are expected, so
/// every operation on a missing connection is a no-op.
#[derive(Debug)]
pub struct ConnectionRegistry<T> {
    connections: HashMap<ConnectionId, Connection<T>>,
}

impl<T> ConnectionRegistry<T> {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    /// Returns false if the connection was already registered; the existing
    /// record is kept untouched in that case.
    pub fn register(&mut self, id: ConnectionId, transport: T) -> bool {
        if self.connections.contains_key(&id) {
            return false;
        }
        self.connections.insert(
            id,
            Connection {
                id,
                session: None,
                live: true,
                transport,
            },
        );
        true
    }

    pub fn unregister(&mut self, id: &ConnectionId) -> Option<Connection<T>> {
        self.connections.remove(id).map(|mut conn| {
            conn.live = false;
            conn
        })
    }

    pub fn lookup(&self, id: &ConnectionId) -> Option<&Connection<T>> {
        self.connections.get(id)
    }

    /// Replace the session of a connection, returning the previous one.
    /// `None` when the connection is unknown.
    pub fn set_session(
        &mut self,
        id: &ConnectionId,
        session: Option<SessionId>,
    ) -> Option<Option<SessionId>> {
        self.connections
            .get_mut(id)
            .map(|conn| std::mem::replace(&mut conn.session, session))
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl<T> Default for ConnectionRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
