//! Session broadcast relay.
//!
//! Connections are registered when their transport link comes up, join at most
//! one session at a time, and fan change events out to every other member of
//! that session. Nothing is persisted or replayed.

pub mod dispatcher;
pub mod guard;
pub mod membership;
pub mod registry;
pub mod state;
pub mod transport;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

pub use dispatcher::{Relay, RelayStats};
pub use guard::ConnectionGuard;
pub use membership::SessionMembership;
pub use registry::{Connection, ConnectionRegistry};
pub use state::{JoinOutcome, RelayState};
pub use transport::{DeliveryError, Transport};

/// Process-unique identifier of one live client link
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Key of a logical session, usually derived from the snippet being edited
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque editor update. The relay never looks inside.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeEvent {
    pub payload: Arc<serde_json::Value>,
}

impl ChangeEvent {
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload: Arc::new(payload),
        }
    }
}
