//! GetSessionHandler - Read a session's history

use std::sync::Arc;

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Query for a session snapshot
#[derive(Debug, Clone, Copy)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Error type for reading a session
#[derive(Debug, thiserror::Error)]
pub enum GetSessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<SessionStoreError> for GetSessionError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => GetSessionError::NotFound(id),
            other => GetSessionError::Storage(other.to_string()),
        }
    }
}

/// Handler for session snapshots
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Returns a copy of the session as of the last completed turn.
    pub async fn handle(&self, query: GetSessionQuery) -> Result<ConversationSession, GetSessionError> {
        let shared = self.store.get(query.session_id).await?;
        let session = shared.lock().await;
        Ok(session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = GetSessionHandler::new(Arc::new(InMemorySessionStore::new()));
        let id = SessionId::new();

        let result = handler.handle(GetSessionQuery { session_id: id }).await;

        assert!(matches!(result, Err(GetSessionError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn returns_snapshot_of_existing_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = ConversationSession::new();
        let id = session.id();
        store.insert(session).await.unwrap();

        let snapshot = GetSessionHandler::new(store)
            .handle(GetSessionQuery { session_id: id })
            .await
            .unwrap();

        assert_eq!(snapshot.id(), id);
    }
}
