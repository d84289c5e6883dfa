use std::collections::{HashMap, HashSet};

use super::{ConnectionId, SessionId};

/// Session-to-members index.
///
/// A session exists only while it has members: it is created by the first
/// `add` and dropped in the same call that removes its last member.
#[derive(Debug, Default)]
pub struct SessionMembership {
    sessions: HashMap<SessionId, HashSet<ConnectionId>>,
}

impl SessionMembership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, session: SessionId, id: ConnectionId) -> bool {
        self.sessions.entry(session).or_default().insert(id)
    }

    pub fn remove(&mut self, session: &SessionId, id: &ConnectionId) -> bool {
        let Some(members) = self.sessions.get_mut(session) else {
            return false;
        };
        let removed = members.remove(id);
        if members.is_empty() {
            self.sessions.remove(session);
        }
        removed
    }

    pub fn members_of(&self, session: &SessionId) -> HashSet<ConnectionId> {
        self.sessions.get(session).cloned().unwrap_or_default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
