//! StartSessionHandler - Open a new, empty chat session

use std::sync::Arc;

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{SessionStore, SessionStoreError};

/// Result of starting a session
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    pub created_at: Timestamp,
}

/// Error type for starting a session
#[derive(Debug, thiserror::Error)]
pub enum StartSessionError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<SessionStoreError> for StartSessionError {
    fn from(err: SessionStoreError) -> Self {
        StartSessionError::Storage(err.to_string())
    }
}

/// Handler for opening sessions
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<StartSessionResult, StartSessionError> {
        let session = ConversationSession::new();
        let result = StartSessionResult {
            session_id: session.id(),
            created_at: *session.created_at(),
        };

        self.store.insert(session).await?;
        let live_sessions = self.store.len().await;
        tracing::info!(
            session_id = %result.session_id,
            live_sessions,
            "session started"
        );

        Ok(result)
    }
}
