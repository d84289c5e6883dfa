use super::{Connection, ConnectionId, ConnectionRegistry, SessionId, SessionMembership};

/// Result of a `join` request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Connection is now a member; `previous` is the session it was moved out of
    Joined { previous: Option<SessionId> },
    AlreadyMember,
    UnknownConnection,
}

/// All in-memory relay state: the connection registry and the session index.
///
/// Both maps are only mutated through this type so that a connection's
/// `session` field and the session index never disagree.
#[derive(Debug)]
pub struct RelayState<T> {
    registry: ConnectionRegistry<T>,
    membership: SessionMembership,
}

impl<T: Clone> RelayState<T> {
    pub fn new() -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            membership: SessionMembership::new(),
        }
    }

    pub fn register(&mut self, id: ConnectionId, transport: T) -> bool {
        self.registry.register(id, transport)
    }

    /// Removes the connection and its session membership. Returns the session
    /// it left, if any.
    pub fn unregister(&mut self, id: &ConnectionId) -> Option<SessionId> {
        let conn = self.registry.unregister(id)?;
        let session = conn.session?;
        self.membership.remove(&session, id);
        Some(session)
    }

    pub fn lookup(&self, id: &ConnectionId) -> Option<&Connection<T>> {
        self.registry.lookup(id)
    }

    pub fn join(&mut self, id: &ConnectionId, session: SessionId) -> JoinOutcome {
        let current = match self.registry.lookup(id) {
            Some(conn) => conn.session.clone(),
            None => return JoinOutcome::UnknownConnection,
        };
        if current.as_ref() == Some(&session) {
            return JoinOutcome::AlreadyMember;
        }
        if let Some(previous) = &current {
            self.membership.remove(previous, id);
        }
        self.membership.add(session.clone(), *id);
        self.registry.set_session(id, Some(session));
        JoinOutcome::Joined { previous: current }
    }

    pub fn leave(&mut self, id: &ConnectionId) -> Option<SessionId> {
        let session = self.registry.set_session(id, None)??;
        self.membership.remove(&session, id);
        Some(session)
    }

    pub fn members_of(&self, session: &SessionId) -> Vec<ConnectionId> {
        self.membership.members_of(session).into_iter().collect()
    }

    /// Transports of every other member of the sender's session. Empty when
    /// the sender is unknown or has no session.
    pub fn recipients(&self, sender: &ConnectionId) -> Vec<(ConnectionId, T)> {
        let Some(session) = self.registry.lookup(sender).and_then(|c| c.session.as_ref()) else {
            return Vec::new();
        };
        self.membership
            .members_of(session)
            .into_iter()
            .filter(|id| id != sender)
            .filter_map(|id| {
                self.registry
                    .lookup(&id)
                    .filter(|conn| conn.live)
                    .map(|conn| (id, conn.transport.clone()))
            })
            .collect()
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    pub fn session_count(&self) -> usize {
        self.membership.session_count()
    }
}

impl<T: Clone> Default for RelayState<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected(state: &mut RelayState<()>) -> ConnectionId {
        let id = ConnectionId::new();
        state.register(id, ());
        id
    }

    #[test]
    fn join_moves_between_sessions() {
        let mut state = RelayState::new();
        let a = connected(&mut state);
        let s1 = SessionId::from("s1");
        let s2 = SessionId::from("s2");

        assert_eq!(state.join(&a, s1.clone()), JoinOutcome::Joined { previous: None });
        assert_eq!(
            state.join(&a, s2.clone()),
            JoinOutcome::Joined { previous: Some(s1.clone()) }
        );
        assert!(state.members_of(&s1).is_empty());
        assert_eq!(state.members_of(&s2), vec![a]);
        assert_eq!(state.lookup(&a).unwrap().session, Some(s2));
        assert_eq!(state.session_count(), 1);
    }

    #[test]
    fn join_same_session_is_noop() {
        let mut state = RelayState::new();
        let a = connected(&mut state);

        state.join(&a, "doc".into());
        assert_eq!(state.join(&a, "doc".into()), JoinOutcome::AlreadyMember);
        assert_eq!(state.members_of(&"doc".into()).len(), 1);
    }

    #[test]
    fn join_unknown_connection() {
        let mut state: RelayState<()> = RelayState::new();
        assert_eq!(
            state.join(&ConnectionId::new(), "doc".into()),
            JoinOutcome::UnknownConnection
        );
        assert_eq!(state.session_count(), 0);
    }

    #[test]
    fn leave_clears_session_and_membership() {
        let mut state = RelayState::new();
        let a = connected(&mut state);
        state.join(&a, "doc".into());

        assert_eq!(state.leave(&a), Some(SessionId::from("doc")));
        assert!(state.lookup(&a).unwrap().session.is_none());
        assert_eq!(state.session_count(), 0);
        assert_eq!(state.leave(&a), None);
        assert_eq!(state.leave(&ConnectionId::new()), None);
    }

    #[test]
    fn unregister_removes_from_session() {
        let mut state = RelayState::new();
        let a = connected(&mut state);
        let b = connected(&mut state);
        state.join(&a, "doc".into());
        state.join(&b, "doc".into());

        assert_eq!(state.unregister(&a), Some(SessionId::from("doc")));
        assert_eq!(state.members_of(&"doc".into()), vec![b]);
        assert_eq!(state.unregister(&b), Some(SessionId::from("doc")));
        assert_eq!(state.session_count(), 0);
        assert_eq!(state.connection_count(), 0);
        assert_eq!(state.unregister(&b), None);
    }

    #[test]
    fn recipients_exclude_sender_and_other_sessions() {
        let mut state = RelayState::new();
        let a = connected(&mut state);
        let b = connected(&mut state);
        let c = connected(&mut state);
        state.join(&a, "s1".into());
        state.join(&b, "s1".into());
        state.join(&c, "s2".into());

        let ids: Vec<_> = state.recipients(&a).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![b]);
    }

    #[test]
    fn recipients_empty_without_session() {
        let mut state = RelayState::new();
        let a = connected(&mut state);
        let b = connected(&mut state);
        state.join(&b, "s1".into());

        assert!(state.recipients(&a).is_empty());
        assert!(state.recipients(&ConnectionId::new()).is_empty());
    }
}
