//! Session Store Port - Interface for holding live chat sessions.
//!
//! Each session sits behind its own async mutex. Holding the guard for a
//! whole turn is what serializes turns within a session while different
//! sessions proceed independently.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::SessionId;

/// Shared handle to one session.
pub type SharedSession = Arc<Mutex<ConversationSession>>;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session already exists: {0}")]
    AlreadyExists(SessionId),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port for creating, looking up and ending sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a new session and returns its shared handle
    ///
    /// # Errors
    /// Returns `SessionStoreError::AlreadyExists` if the id is taken
    async fn insert(&self, session: ConversationSession) -> Result<SharedSession, SessionStoreError>;

    /// Looks up a session
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if no session exists
    async fn get(&self, id: SessionId) -> Result<SharedSession, SessionStoreError>;

    /// Removes a session, discarding its history
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if no session exists
    async fn remove(&self, id: SessionId) -> Result<(), SessionStoreError>;

    /// Number of live sessions
    async fn len(&self) -> usize;
}
