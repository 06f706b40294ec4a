//! In-Memory Session Store Adapter
//!
//! Holds live chat sessions in a map. Sessions last until they are ended
//! or the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError, SharedSession};

/// In-memory storage for chat sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SharedSession>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: ConversationSession) -> Result<SharedSession, SessionStoreError> {
        let id = session.id();
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(SessionStoreError::AlreadyExists(id));
        }
        let shared = Arc::new(Mutex::new(session));
        sessions.insert(id, shared.clone());
        Ok(shared)
    }

    async fn get(&self, id: SessionId) -> Result<SharedSession, SessionStoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn remove(&self, id: SessionId) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_get_returns_same_handle() {
        let store = InMemorySessionStore::new();
        let session = ConversationSession::new();
        let id = session.id();

        let inserted = store.insert(session).await.unwrap();
        let fetched = store.get(id).await.unwrap();

        assert!(Arc::ptr_eq(&inserted, &fetched));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_unknown_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        let result = store.get(id).await;
        assert!(matches!(result, Err(SessionStoreError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn inserting_same_id_twice_fails() {
        let store = InMemorySessionStore::new();
        let session = ConversationSession::new();

        store.insert(session.clone()).await.unwrap();
        let result = store.insert(session).await;
        assert!(matches!(result, Err(SessionStoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn remove_deletes_session() {
        let store = InMemorySessionStore::new();
        let session = ConversationSession::new();
        let id = session.id();
        store.insert(session).await.unwrap();

        store.remove(id).await.unwrap();

        assert_eq!(store.len().await, 0);
        assert!(matches!(
            store.remove(id).await,
            Err(SessionStoreError::NotFound(_))
        ));
    }
}
