//! Session lifecycle.

use dashmap::DashMap;

use litnet_core::errors::RetrievalError;

use crate::session::ChatSession;

/// Concurrent session registry. Each session exclusively owns its index
/// and retriever; `with_session` hands out `&mut` access one caller at a
/// time through the map's own locking.
#[derive(Default)]
pub struct SessionManager {
    sessions: DashMap<String, ChatSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session, returning its id.
    pub fn insert(&self, session: ChatSession) -> String {
        let id = session.id.clone();
        tracing::debug!(session = %id, selection = %session.selection.id, "session created");
        self.sessions.insert(id.clone(), session);
        id
    }

    /// Run `f` with exclusive access to a session.
    ///
    /// The map's shard lock is held for the duration of `f`, so callers
    /// must not block on external I/O inside it.
    pub fn with_session<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut ChatSession) -> R,
    ) -> Result<R, RetrievalError> {
        let mut entry = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| RetrievalError::SessionNotFound { id: id.to_string() })?;
        Ok(f(entry.value_mut()))
    }

    /// Drop a session and its retrieval context.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::debug!(session = %id, "session ended");
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
