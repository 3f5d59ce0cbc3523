use crate::game_state::SessionState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

// Client-held credential identifying one session's state on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Server-side session storage. The orchestrator is handed a store instead of
// reaching into ambient framework state; state lives only as long as the
// store does.
pub trait SessionStore {
    // State for the given session, or a fresh default if it was never seen.
    fn load(&self, id: SessionId) -> SessionState;
    fn save(&mut self, id: SessionId, state: SessionState);
}

// The only store shipped: a process-local map. One in-flight turn per session
// is assumed; concurrent turns against the same session are not supported.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: HashMap<SessionId, SessionState>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, id: SessionId) -> SessionState {
        self.sessions.get(&id).cloned().unwrap_or_default()
    }

    fn save(&mut self, id: SessionId, state: SessionState) {
        self.sessions.insert(id, state);
    }
}
